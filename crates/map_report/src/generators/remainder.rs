//! The catch-all pass for fixtures no other generator described.
use tracing::warn;

use crate::error::Result;
use crate::generators::{section, ReportContext, ReportGenerator};
use crate::output::{Block, Item};
use crate::registry::Entry;

/// Describes everything still unclaimed by its plain-text form.
#[derive(Clone, Copy, Debug, Default)]
pub struct RemainderGenerator;

impl RemainderGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for RemainderGenerator {
    fn name(&self) -> &'static str {
        "remainder"
    }

    fn produce_all<'a>(&self, ctx: &mut ReportContext<'a>) -> Result<Vec<Block>> {
        let mut items = Vec::new();
        for (entry, _) in ctx.matching(|_| Some(())) {
            warn!(
                "Fixture {} at {} left for the remainder pass: {}.",
                entry.id, entry.point, entry.fixture
            );
            items.push(self.produce_one(ctx, entry)?);
        }
        Ok(section("Other fixtures", items))
    }

    fn produce_one<'a>(&self, ctx: &mut ReportContext<'a>, entry: Entry<'a>) -> Result<Item> {
        let mut item = ctx.plain_item(&entry);
        item.text = ctx.located(entry.point, &item.text);
        Ok(item)
    }
}
