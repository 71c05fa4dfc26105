use std::rc::Rc;

use indexmap::IndexMap;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            anchor::Anchor,
            core::{Number, Value},
        },
    },
};

/// A position qualifier: where a value stands relative to an anchor.
///
/// Exactly one qualifier holds for any value/anchor pair, decided by the
/// anchor's tolerance. An offset of exactly the tolerance is `near`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    /// The value lies above the anchor's tolerance band.
    Over,
    /// The value lies below the anchor's tolerance band.
    Under,
    /// The value lies within the tolerance band.
    Near,
}

impl Qualifier {
    /// Parses a qualifier string from a `when` clause.
    ///
    /// # Parameters
    /// - `text`: The quoted qualifier as written in the source.
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Errors
    /// Returns `RuntimeError::UnknownQualifier` for anything other than
    /// `over`, `under`, or `near`.
    pub fn parse(text: &str, line: usize) -> EvalResult<Self> {
        match text {
            "over" => Ok(Self::Over),
            "under" => Ok(Self::Under),
            "near" => Ok(Self::Near),
            _ => Err(RuntimeError::UnknownQualifier { qualifier: text.to_string(),
                                                      line }),
        }
    }

    /// Classifies a value against an anchor.
    ///
    /// - `over`: value > anchor + tolerance
    /// - `under`: value < anchor − tolerance
    /// - `near`: |value − anchor| ≤ tolerance
    #[must_use]
    pub fn of(value: f64, anchor: &Anchor) -> Self {
        let reference = anchor.value.to_f64();

        if value > reference + anchor.tolerance {
            Self::Over
        } else if value < reference - anchor.tolerance {
            Self::Under
        } else {
            Self::Near
        }
    }

    /// Returns whether `self` is the qualifier that holds for `value`
    /// against `anchor`.
    #[must_use]
    pub fn holds(self, value: f64, anchor: &Anchor) -> bool {
        Self::of(value, anchor) == self
    }
}

impl std::fmt::Display for Qualifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Over => "over",
            Self::Under => "under",
            Self::Near => "near",
        };
        write!(f, "{text}")
    }
}

/// A cached position of a relational value against one of its anchors.
///
/// Snapshotted at creation: the anchor is immutable and the value fixed, so
/// the offset and qualifier never change afterwards. Holding the anchor by
/// `Rc` keeps the snapshot stable even if the environment later rebinds the
/// anchor's name.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// The referenced anchor.
    pub anchor:    Rc<Anchor>,
    /// Absolute offset `|value − anchor.value|`; integer when both operands
    /// are integers.
    pub offset:    Number,
    /// The qualifier that holds for this pair.
    pub qualifier: Qualifier,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.offset, self.qualifier, self.anchor.name)
    }
}

/// A numeric value that knows its position relative to a set of anchors.
///
/// The display form renders every position in declaration order:
///
/// ```text
/// 108 (8 over threshold)
/// 15 (5 over a, 5 under b)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Relational {
    /// The underlying numeric value, fixed at creation.
    pub value:     Number,
    /// Positions against the referenced anchors, in declaration order.
    /// Never empty.
    pub positions: Vec<Position>,
    /// Metadata entries in declaration order, under the same recognized-key
    /// discipline as anchors.
    pub metadata:  IndexMap<String, Value>,
}

impl Relational {
    /// Builds a relational value, snapshotting offset and qualifier for
    /// every referenced anchor.
    ///
    /// # Parameters
    /// - `value`: The evaluated numeric value.
    /// - `anchors`: Resolved anchors in declaration order.
    /// - `metadata`: Evaluated metadata entries.
    #[must_use]
    pub fn new(value: Number,
               anchors: Vec<Rc<Anchor>>,
               metadata: IndexMap<String, Value>)
               -> Self {
        let positions = anchors.into_iter()
                               .map(|anchor| {
                                   let offset = value.offset_from(anchor.value);
                                   let qualifier = Qualifier::of(value.to_f64(), &anchor);
                                   Position { anchor,
                                              offset,
                                              qualifier }
                               })
                               .collect();

        Self { value,
               positions,
               metadata }
    }

    /// Looks up the cached position for an anchor by name.
    #[must_use]
    pub fn position_for(&self, name: &str) -> Option<&Position> {
        self.positions.iter().find(|position| position.anchor.name == name)
    }
}

impl std::fmt::Display for Relational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (", self.value)?;

        for (index, position) in self.positions.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{position}")?;
        }

        write!(f, ")")
    }
}
