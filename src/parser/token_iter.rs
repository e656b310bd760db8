//! Submodule creating the `TokenIter` struct, an iterator over the
//! [`Token`]s found in a SMILES string, each tagged with its byte span.

use elements_rs::Element;

use crate::{
    atom::{
        atom_symbol::AtomSymbol,
        bracketed::{BracketAtom, charge::Charge, chirality::Chirality, hydrogen_count::HydrogenCount},
        unbracketed::UnbracketedAtom,
    },
    bond::{Bond, ring_num::RingNum},
    errors::{SmilesError, SmilesErrorWithSpan},
    token::{Token, TokenWithSpan},
};

/// An iterator over the tokens found in a SMILES string. Tracks a byte
/// position rather than a `Peekable<Chars>` so that bracket-atom scanning
/// (which must look arbitrarily far ahead for the matching `]`) can resync
/// the cursor in one step.
pub struct TokenIter<'a> {
    /// The full source string.
    input: &'a str,
    /// Current byte offset.
    pos: usize,
}

impl<'a> From<&'a str> for TokenIter<'a> {
    fn from(s: &'a str) -> Self {
        TokenIter { input: s, pos: 0 }
    }
}

fn err(kind: SmilesError, start: usize, end: usize) -> SmilesErrorWithSpan {
    SmilesErrorWithSpan::new(kind, start, end)
}

impl<'a> TokenIter<'a> {
    /// Returns the char starting at `self.input[offset..]`, if any.
    fn char_at(&self, offset: usize) -> Option<char> {
        self.input[offset..].chars().next()
    }

    fn advance(&mut self) -> Result<TokenWithSpan, SmilesErrorWithSpan> {
        let start = self.pos;
        let c = self.char_at(start).expect("advance called at end of input");
        let clen = c.len_utf8();

        let (token, end) = match c {
            '(' => (Token::OpenParen, start + clen),
            ')' => (Token::CloseParen, start + clen),
            '.' => (Token::Dot, start + clen),
            '-' => (Token::Bond(Bond::Single), start + clen),
            '=' => (Token::Bond(Bond::Double), start + clen),
            '#' => (Token::Bond(Bond::Triple), start + clen),
            '$' => (Token::Bond(Bond::Quadruple), start + clen),
            ':' => (Token::Bond(Bond::Aromatic), start + clen),
            '/' => (Token::Bond(Bond::Up), start + clen),
            '\\' => (Token::Bond(Bond::Down), start + clen),
            '*' => {
                (Token::UnbracketedAtom(UnbracketedAtom::new(AtomSymbol::new_wildcard(), false)), start + clen)
            }
            ']' => return Err(err(SmilesError::UnexpectedCharacter(']'), start, start + clen)),
            '[' => self.advance_bracket(start)?,
            '%' => self.advance_percent_ring(start)?,
            digit @ '0'..='9' => {
                let num = digit.to_digit(10).expect("ascii digit") as u8;
                let ring = RingNum::try_new(num).map_err(|e| err(e, start, start + clen))?;
                (Token::RingClosure(ring), start + clen)
            }
            letter if letter.is_ascii_uppercase() => self.advance_uppercase_atom(start, letter)?,
            letter if letter.is_ascii_lowercase() => self.advance_lowercase_atom(start, letter)?,
            other => return Err(err(SmilesError::UnexpectedCharacter(other), start, start + clen)),
        };

        self.pos = end;
        Ok(TokenWithSpan::new(token, start, end))
    }

    fn advance_percent_ring(&self, start: usize) -> Result<(Token, usize), SmilesErrorWithSpan> {
        let d0 = self.char_at(start + 1).filter(char::is_ascii_digit);
        let d1 = d0.and_then(|_| self.char_at(start + 2)).filter(char::is_ascii_digit);
        match (d0, d1) {
            (Some(d0), Some(d1)) => {
                let value = d0.to_digit(10).unwrap() as u8 * 10 + d1.to_digit(10).unwrap() as u8;
                let ring = RingNum::try_new(value).map_err(|e| err(e, start, start + 3))?;
                Ok((Token::RingClosure(ring), start + 3))
            }
            _ => Err(err(SmilesError::UnexpectedPercent, start, start + 1)),
        }
    }

    fn advance_uppercase_atom(&self, start: usize, c: char) -> Result<(Token, usize), SmilesErrorWithSpan> {
        // Two-letter organic-subset symbols (Cl, Br) require one character of
        // lookahead; these are the only unbracketed multi-letter symbols.
        if let Some(next) = self.char_at(start + 1) {
            let two_letter = match (c, next) {
                ('C', 'l') => Some(Element::Cl),
                ('B', 'r') => Some(Element::Br),
                _ => None,
            };
            if let Some(element) = two_letter {
                let atom = UnbracketedAtom::new(AtomSymbol::Element(element), false);
                return Ok((Token::UnbracketedAtom(atom), start + 1 + next.len_utf8()));
            }
        }

        let symbol = AtomSymbol::Element(
            Element::try_from(c).map_err(|_| err(SmilesError::UnexpectedCharacter(c), start, start + 1))?,
        );
        if !symbol.is_organic_subset() {
            return Err(err(SmilesError::ElementRequiresBrackets, start, start + 1));
        }
        Ok((Token::UnbracketedAtom(UnbracketedAtom::new(symbol, false)), start + 1))
    }

    fn advance_lowercase_atom(&self, start: usize, c: char) -> Result<(Token, usize), SmilesErrorWithSpan> {
        let symbol = AtomSymbol::Element(
            Element::try_from(c.to_ascii_uppercase())
                .map_err(|_| err(SmilesError::UnexpectedCharacter(c), start, start + 1))?,
        );
        if !symbol.is_aromatic_subset() {
            return Err(err(SmilesError::InvalidUnbracketedAtom(symbol), start, start + 1));
        }
        Ok((Token::UnbracketedAtom(UnbracketedAtom::new(symbol, true)), start + 1))
    }

    fn advance_bracket(&self, open_pos: usize) -> Result<(Token, usize), SmilesErrorWithSpan> {
        let rest = &self.input[open_pos + 1..];
        let mut close_rel = None;
        for (i, ch) in rest.char_indices() {
            if ch == ']' {
                close_rel = Some(i);
                break;
            }
            if ch == '[' {
                let pos = open_pos + 1 + i;
                return Err(err(SmilesError::UnexpectedLeftBracket, pos, pos + 1));
            }
        }
        let Some(close_rel) = close_rel else {
            return Err(err(SmilesError::UnclosedBracket, open_pos, self.input.len()));
        };
        let inner = &rest[..close_rel];
        let inner_base = open_pos + 1;
        let bracket_atom = parse_bracket_atom(inner, inner_base)?;
        let close_abs = inner_base + close_rel;
        Ok((Token::BracketedAtom(bracket_atom), close_abs + 1))
    }
}

impl Iterator for TokenIter<'_> {
    type Item = Result<TokenWithSpan, SmilesErrorWithSpan>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }
        let result = self.advance();
        if result.is_err() {
            // Stop iteration after the first error rather than risk looping
            // on a position that did not advance.
            self.pos = self.input.len();
        }
        Some(result)
    }
}

/// Splits `s` at the end of its leading run of ascii digits.
fn take_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Parses the interior of a bracket atom (`inner`, the text strictly
/// between `[` and `]`), with `base` the absolute byte offset of `inner`'s
/// first byte in the original source, used to build correctly-spanned
/// errors.
fn parse_bracket_atom(inner: &str, base: usize) -> Result<BracketAtom, SmilesErrorWithSpan> {
    let mut rest = inner;
    let mut offset = base;
    let mut builder = BracketAtom::builder();

    // Isotope: leading digits.
    let (digits, tail) = take_digits(rest);
    if !digits.is_empty() {
        let value: u16 =
            digits.parse().map_err(|_| err(SmilesError::InvalidIsotope, offset, offset + digits.len()))?;
        builder = builder.with_isotope(value);
        offset += digits.len();
        rest = tail;
    }

    // Element symbol (or wildcard).
    let mut chars = rest.char_indices();
    let (_, c0) = chars.next().ok_or_else(|| err(SmilesError::MissingBracketElement, offset, offset))?;
    let (symbol, aromatic, consumed) = if c0 == '*' {
        (AtomSymbol::new_wildcard(), false, c0.len_utf8())
    } else {
        let c1 = chars.next();
        if let Some((i1, c1)) = c1
            && c0.is_ascii_alphabetic()
            && c1.is_ascii_alphabetic()
            && let Ok(element) = Element::try_from([c0, c1])
        {
            let aromatic = c0.is_ascii_lowercase();
            (AtomSymbol::Element(element), aromatic, i1 + c1.len_utf8())
        } else {
            let aromatic = c0.is_ascii_lowercase();
            let element = Element::try_from(c0.to_ascii_uppercase())
                .map_err(|_| err(SmilesError::InvalidElementName(c0), offset, offset + c0.len_utf8()))?;
            (AtomSymbol::Element(element), aromatic, c0.len_utf8())
        }
    };
    if aromatic && !symbol.is_aromatic_subset() {
        let element = symbol.element().expect("aromatic symbol always has an element");
        return Err(err(SmilesError::InvalidAromaticElement(element), offset, offset + consumed));
    }
    builder = builder.with_symbol(symbol).with_aromatic(aromatic);
    offset += consumed;
    rest = &rest[consumed..];

    // Chirality.
    if let Some(tail) = rest.strip_prefix('@') {
        offset += 1;
        if let Some(tail) = tail.strip_prefix('@') {
            builder = builder.with_chiral(Chirality::AtAt);
            offset += 1;
            rest = tail;
        } else if let Some((kind, tail)) = strip_chirality_kind(tail) {
            let (digits, tail2) = take_digits(tail);
            let num: u8 = if digits.is_empty() { 1 } else { digits.parse().unwrap_or(0) };
            let kind_start = offset;
            offset += kind.len() + digits.len();
            let chirality =
                build_extended_chirality(kind, num).map_err(|e| err(e, kind_start, offset))?;
            builder = builder.with_chiral(chirality);
            rest = tail2;
        } else {
            builder = builder.with_chiral(Chirality::At);
            rest = tail;
        }
    }

    // Explicit hydrogen count.
    if let Some(tail) = rest.strip_prefix('H') {
        offset += 1;
        let (digits, tail2) = take_digits(tail);
        let count: u8 = if digits.is_empty() {
            1
        } else {
            digits.parse().map_err(|_| err(SmilesError::InvalidNumber, offset, offset + digits.len()))?
        };
        offset += digits.len();
        builder = builder.with_hydrogens(HydrogenCount::new(Some(count)));
        rest = tail2;
    }

    // Formal charge.
    if let Some(sign_char) = rest.chars().next().filter(|c| *c == '+' || *c == '-') {
        let sign: i8 = if sign_char == '+' { 1 } else { -1 };
        let tail = &rest[1..];
        let sign_offset = offset;
        offset += 1;
        let (digits, tail2) = take_digits(tail);
        let (magnitude, consumed_len, final_tail) = if !digits.is_empty() {
            let value: i8 =
                digits.parse().map_err(|_| err(SmilesError::InvalidNumber, offset, offset + digits.len()))?;
            (value, digits.len(), tail2)
        } else {
            // Count repeated sign characters: "++" == +2, "---" == -3.
            let mut count = 1i8;
            let mut scan = tail;
            let mut consumed = 0usize;
            while let Some(next) = scan.chars().next() {
                if next == sign_char {
                    count += 1;
                    consumed += 1;
                    scan = &scan[1..];
                } else {
                    break;
                }
            }
            (count, consumed, scan)
        };
        offset += consumed_len;
        let value = sign * magnitude;
        let charge = Charge::try_new(value).map_err(|e| err(e, sign_offset, offset))?;
        builder = builder.with_charge(charge);
        rest = final_tail;
    }

    // Atom class.
    if let Some(tail) = rest.strip_prefix(':') {
        offset += 1;
        let (digits, tail2) = take_digits(tail);
        if digits.is_empty() {
            return Err(err(SmilesError::InvalidClass, offset, offset));
        }
        let class: u16 =
            digits.parse().map_err(|_| err(SmilesError::InvalidClass, offset, offset + digits.len()))?;
        offset += digits.len();
        builder = builder.with_class(class);
        rest = tail2;
    }

    if let Some(extra) = rest.chars().next() {
        return Err(err(SmilesError::UnexpectedCharacter(extra), offset, offset + extra.len_utf8()));
    }

    Ok(builder.build())
}

/// Recognizes one of the two-letter extended chirality prefixes
/// (`TH`, `AL`, `SP`, `TB`, `OH`) at the start of `s`.
fn strip_chirality_kind(s: &str) -> Option<(&'static str, &str)> {
    for kind in ["TH", "AL", "SP", "TB", "OH"] {
        if let Some(tail) = s.strip_prefix(kind) {
            return Some((kind, tail));
        }
    }
    None
}

fn build_extended_chirality(kind: &str, num: u8) -> Result<Chirality, SmilesError> {
    match kind {
        "TH" => Chirality::try_th(num),
        "AL" => Chirality::try_al(num),
        "SP" => Chirality::try_sp(num),
        "TB" => Chirality::try_tb(num),
        "OH" => Chirality::try_oh(num),
        _ => unreachable!("strip_chirality_kind only returns known kinds"),
    }
}
