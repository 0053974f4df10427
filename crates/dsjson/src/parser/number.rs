use super::Reader;
use crate::{
    error::SyntaxError,
    source::CharSource,
    value::{Node, Number, Sign},
};

impl<S: CharSource> Reader<'_, S> {
    /// Reads `['-'] major ['.' minor] [('e'|'E') [sign] exp]`.
    ///
    /// A malformed literal yields an error-flagged node holding whatever
    /// parts were read before the problem.
    pub(super) fn read_number(&mut self) -> Node {
        let mut number = Number::default();
        let ok = self.read_number_parts(&mut number);
        log::trace!("number {number} ok={ok}");
        let node = Node::number(number);
        if ok { node } else { node.with_error() }
    }

    fn read_number_parts(&mut self, number: &mut Number) -> bool {
        match self.scanner.read_char() {
            Some('-') => number.negative = true,
            Some(c) if c.is_ascii_digit() => self.scanner.unget_last(),
            found => {
                self.expected("number", found);
                return false;
            }
        }

        number.major = self.scanner.read_digit_run();
        if number.major.is_empty() {
            report!(self, Error, SyntaxError::MissingDigits("integer part"));
            return false;
        }
        if number.major.len() > 1 && number.major.starts_with('0') {
            report!(self, Error, SyntaxError::LeadingZero);
            return false;
        }

        match self.scanner.read_char() {
            Some('.') => {
                number.minor = self.scanner.read_digit_run();
                if number.minor.is_empty() {
                    report!(self, Error, SyntaxError::MissingDigits("fraction"));
                    return false;
                }
            }
            Some(_) => self.scanner.unget_last(),
            None => return true,
        }

        match self.scanner.read_char() {
            Some('e' | 'E') => {}
            Some(_) => {
                self.scanner.unget_last();
                return true;
            }
            None => return true,
        }

        match self.scanner.read_char() {
            Some('+') => number.exp_sign = Some(Sign::Plus),
            Some('-') => number.exp_sign = Some(Sign::Minus),
            Some(_) => self.scanner.unget_last(),
            None => {}
        }
        number.exp = self.scanner.read_digit_run();
        if number.exp.is_empty() {
            report!(self, Error, SyntaxError::MissingDigits("exponent"));
            return false;
        }
        true
    }
}
