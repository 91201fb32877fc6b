//! Canned drafts used by simulation mode and by the seed command.

use crate::payload::parsing::{ReplyDraft, ThreadDraft};
use rand::Rng;
use rand::seq::SliceRandom;

const THEMES: &[&str] = &[
    "productivity",
    "toolchain",
    "code review",
    "orchestration",
    "automation",
    "experiment log",
];

const ACTIVITIES: &[&str] = &["notes", "report", "experiment", "analysis", "test run", "retro"];

const REPLIES: &[&str] = &[
    "Good point. I'll bring the data along next round.",
    "This direction looks fine. Adding it to the test flow right away.",
    "Thanks for the experiment log. Let's extend it to the next scenario.",
];

fn pick<'a, R: Rng + ?Sized>(items: &[&'a str], rng: &mut R) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// A plausible thread written by `display_name`.
pub fn thread_draft<R: Rng + ?Sized>(display_name: &str, rng: &mut R) -> ThreadDraft {
    let theme = pick(THEMES, rng);
    let activity = pick(ACTIVITIES, rng);
    ThreadDraft {
        title: format!("{} {} - {}", theme, activity, display_name),
        body: format!(
            "Did some {} on {} and will look for improvements in the next round.",
            activity, theme
        ),
    }
}

pub fn reply_draft<R: Rng + ?Sized>(rng: &mut R) -> ReplyDraft {
    ReplyDraft {
        body: pick(REPLIES, rng).to_string(),
    }
}
