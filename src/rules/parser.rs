use super::ast::{Action, Location, Predicate, Rule};
use super::glob::Glob;
use super::tokenizer::tokenize;
use crate::common::errors::{ParseError, ParseErrorKind};

const WHEN: &str = "when";
const AND: &str = "and";
const NOT: &str = "not";
const EXISTS: &str = "exists";

/// Parse a whole rule document, one rule per line.
///
/// Blank and comment lines are skipped. The first failing line aborts the
/// parse; no partial rule list is returned.
pub fn parse_text(text: &str) -> Result<Vec<Rule>, ParseError> {
    let mut rules = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let tokens = tokenize(line);
        match parse_line(&tokens) {
            Ok(Some(rule)) => rules.push(rule),
            Ok(None) => {}
            Err(kind) => {
                return Err(ParseError {
                    line: index + 1,
                    text: line.trim().to_string(),
                    kind,
                })
            }
        }
    }

    tracing::debug!(count = rules.len(), "parsed rules");
    Ok(rules)
}

/// Parse the tokens of one line. An empty token list yields `Ok(None)`.
pub fn parse_line(tokens: &[&str]) -> Result<Option<Rule>, ParseErrorKind> {
    if tokens.is_empty() {
        return Ok(None);
    }

    let mut cursor = Cursor { tokens, pos: 0 };
    let rule = cursor.rule()?;
    Ok(Some(rule))
}

struct Cursor<'a> {
    tokens: &'a [&'a str],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<&'a str> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn rule(&mut self) -> Result<Rule, ParseErrorKind> {
        let action_token = self.next().unwrap_or_default();
        let action: Action = action_token
            .parse()
            .map_err(|_| ParseErrorKind::UnknownAction {
                found: action_token.to_string(),
            })?;

        let target = self.next().ok_or_else(|| ParseErrorKind::MissingTarget {
            action: action_token.to_string(),
        })?;

        let condition = match self.next() {
            None => None,
            Some(WHEN) => Some(self.condition()?),
            Some(found) => {
                return Err(ParseErrorKind::UnexpectedToken {
                    expected: format!("'{}' or end of line", WHEN),
                    found: found.to_string(),
                })
            }
        };

        Ok(Rule {
            action,
            target: Glob::new(target),
            condition,
        })
    }

    fn condition(&mut self) -> Result<Predicate, ParseErrorKind> {
        let mut operands = vec![self.predicate()?];

        while let Some(token) = self.next() {
            if token != AND {
                return Err(ParseErrorKind::UnexpectedToken {
                    expected: format!("'{}' or end of line", AND),
                    found: token.to_string(),
                });
            }
            operands.push(self.predicate()?);
        }

        if operands.len() == 1 {
            Ok(operands.remove(0))
        } else {
            Ok(Predicate::And(operands))
        }
    }

    fn predicate(&mut self) -> Result<Predicate, ParseErrorKind> {
        let token = self.next().ok_or_else(|| ParseErrorKind::UnexpectedEnd {
            expected: "a condition".to_string(),
        })?;

        if token == NOT {
            return Ok(Predicate::negate(self.predicate()?));
        }

        let location = if token == EXISTS {
            Location::Here
        } else {
            let location: Location =
                token
                    .parse()
                    .map_err(|_| ParseErrorKind::UnexpectedToken {
                        expected: format!("'{}', '{}' or a location", EXISTS, NOT),
                        found: token.to_string(),
                    })?;
            match self.next() {
                Some(EXISTS) => {}
                Some(found) => {
                    return Err(ParseErrorKind::UnexpectedToken {
                        expected: format!("'{}'", EXISTS),
                        found: found.to_string(),
                    })
                }
                None => {
                    return Err(ParseErrorKind::UnexpectedEnd {
                        expected: format!("'{}' after '{}'", EXISTS, location),
                    })
                }
            }
            location
        };

        let pattern = self.next().ok_or(ParseErrorKind::MissingPattern)?;
        Ok(Predicate::Exists {
            location,
            pattern: Glob::new(pattern),
        })
    }
}
