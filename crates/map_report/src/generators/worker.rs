//! Workers, normally described as members of their unit.
use crate::error::{Error, Result};
use crate::generators::{section, ReportContext, ReportGenerator};
use crate::map::{Fixture, Job, Worker, WorkerStats};
use crate::output::{Block, Item, Row, Table};
use crate::registry::Entry;

/// Describes workers. With `details` set, stats and experience are included; reports
/// only show them for workers in the current player's own units.
#[derive(Clone, Copy, Debug)]
pub struct WorkerGenerator {
    details: bool,
}

impl WorkerGenerator {
    pub fn new(details: bool) -> Self {
        Self { details }
    }

    fn stats_line(stats: &WorkerStats) -> String {
        format!(
            "{}/{} hit points; Str {}, Dex {}, Con {}, Int {}, Wis {}, Cha {}",
            stats.hit_points,
            stats.max_hit_points,
            stats.strength,
            stats.dexterity,
            stats.constitution,
            stats.intelligence,
            stats.wisdom,
            stats.charisma
        )
    }

    fn job_item(job: &Job) -> Item {
        let mut item = Item::new(format!("{} levels in {}", job.level, job.name));
        for skill in &job.skills {
            item.push_nested(Item::new(format!(
                "{}: level {} ({} hours of experience)",
                skill.name, skill.level, skill.hours
            )));
        }
        item
    }

    fn jobs_cell(worker: &Worker) -> String {
        worker
            .jobs
            .iter()
            .map(|job| format!("{} {}", job.name, job.level))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for WorkerGenerator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ReportGenerator for WorkerGenerator {
    fn name(&self) -> &'static str {
        "worker"
    }

    fn produce_all<'a>(&self, ctx: &mut ReportContext<'a>) -> Result<Vec<Block>> {
        let mut items = Vec::new();
        for (entry, _) in ctx.matching(|f| matches!(f, Fixture::Worker(_)).then_some(())) {
            let mut item = self.produce_one(ctx, entry)?;
            item.text = ctx.located(entry.point, &item.text);
            items.push(item);
        }
        Ok(section("Workers", items))
    }

    fn produce_one<'a>(&self, ctx: &mut ReportContext<'a>, entry: Entry<'a>) -> Result<Item> {
        let Fixture::Worker(worker) = entry.fixture else {
            return Err(Error::unhandled(self.name(), entry.fixture));
        };
        let [distance, location] = ctx.row_prefix(entry.point);
        let mut item = Item::new(worker.to_string()).with_row(Row::new(
            Table::Workers,
            [
                distance,
                location,
                worker.name.clone(),
                worker.race.clone(),
                if self.details {
                    Self::jobs_cell(worker)
                } else {
                    String::new()
                },
            ],
        ));
        if self.details {
            if let Some(stats) = &worker.stats {
                item.push_nested(Item::new(Self::stats_line(stats)));
            }
            if !worker.jobs.is_empty() {
                let mut jobs = Item::new("Experience:");
                for job in &worker.jobs {
                    jobs.push_nested(Self::job_item(job));
                }
                item.push_nested(jobs);
            }
        }
        ctx.claim(&entry);
        Ok(item)
    }
}
