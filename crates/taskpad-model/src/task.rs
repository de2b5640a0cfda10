use std::fmt;
use std::str::FromStr;

use serde::{
  Deserialize,
  Serialize
};

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for TaskId {
  type Err = std::num::ParseIntError;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    s.trim().parse::<u64>().map(Self)
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Task {
  pub id:        TaskId,
  pub text:      String,
  #[serde(default)]
  pub completed: bool
}

impl Task {
  /// Builds a pending task from raw
  /// input, or `None` when the input is
  /// blank.
  pub fn from_input(
    id: TaskId,
    raw: &str
  ) -> Option<Self> {
    let text = raw.trim();
    if text.is_empty() {
      return None;
    }

    Some(Self {
      id,
      text: text.to_string(),
      completed: false
    })
  }

  pub fn matches_search(
    &self,
    needle_lower: &str
  ) -> bool {
    needle_lower.is_empty()
      || self
        .text
        .to_lowercase()
        .contains(needle_lower)
  }
}
