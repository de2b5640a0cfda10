use chrono::Utc;
use tracing::trace;

use crate::task::TaskId;

/// Hands out task ids that look like
/// creation timestamps (milliseconds)
/// but are strictly increasing, so two
/// adds within the same tick still get
/// distinct ids.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct IdGenerator {
  last: u64
}

impl IdGenerator {
  pub fn next_at(
    &mut self,
    now_millis: u64
  ) -> TaskId {
    let id = now_millis
      .max(self.last.saturating_add(1));
    if id != now_millis {
      trace!(
        now_millis,
        id, "clock tick reused, bumped id"
      );
    }
    self.last = id;
    TaskId(id)
  }

  pub fn next(&mut self) -> TaskId {
    let now = u64::try_from(
      Utc::now().timestamp_millis()
    )
    .unwrap_or_default();
    self.next_at(now)
  }
}
