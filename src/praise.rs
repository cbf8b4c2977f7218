use rand::{Rng, SeedableRng, rngs::StdRng, rngs::ThreadRng};
use serde::{Deserialize, Serialize};

/// Caller-level reply when the day already has the record; never classified.
pub const ALREADY_RECORDED_PRAISE: &str = "今日はもう頑張りました！";
pub const ALREADY_RECORDED_MESSAGE: &str = "既に記録済みです";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PraiseCategory {
    Legendary,
    Master,
    Habit,
    Milestone,
    StreakLong,
    StreakMedium,
    StreakWeek,
    StreakShort,
    StreakStart,
    Daily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Animation {
    Celebration,
    Fireworks,
    Rainbow,
    Sparkle,
    Fire,
    Star,
    Confetti,
    Pulse,
    Bounce,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneResult {
    pub message: String,
    pub category: PraiseCategory,
    pub animation: Animation,
    pub is_milestone: bool,
}

struct Milestone {
    at: u64,
    message: &'static str,
    category: PraiseCategory,
    animation: Animation,
}

const STREAK_MILESTONES: &[Milestone] = &[
    Milestone {
        at: 7,
        message: "7日連続！🎉 1週間達成！",
        category: PraiseCategory::Milestone,
        animation: Animation::Confetti,
    },
    Milestone {
        at: 10,
        message: "10日連続！⭐ 二桁達成！",
        category: PraiseCategory::Milestone,
        animation: Animation::Star,
    },
    Milestone {
        at: 14,
        message: "14日連続！🔥 2週間達成！",
        category: PraiseCategory::Milestone,
        animation: Animation::Fire,
    },
    Milestone {
        at: 21,
        message: "21日連続！🌟 習慣形成完了！",
        category: PraiseCategory::Milestone,
        animation: Animation::Sparkle,
    },
    Milestone {
        at: 30,
        message: "30日連続！🎯 完全に習慣化！",
        category: PraiseCategory::Habit,
        animation: Animation::Rainbow,
    },
    Milestone {
        at: 50,
        message: "50日連続！🏆 もはや達人！",
        category: PraiseCategory::Master,
        animation: Animation::Fireworks,
    },
    Milestone {
        at: 100,
        message: "100日連続！🎊 伝説の領域！",
        category: PraiseCategory::Legendary,
        animation: Animation::Celebration,
    },
];

const TOTAL_MILESTONES: &[Milestone] = &[
    Milestone {
        at: 10,
        message: "10回達成！🎉 二桁突入！",
        category: PraiseCategory::Milestone,
        animation: Animation::Confetti,
    },
    Milestone {
        at: 30,
        message: "30回達成！⭐ 継続の力！",
        category: PraiseCategory::Milestone,
        animation: Animation::Star,
    },
    Milestone {
        at: 50,
        message: "50回達成！🌟 半世紀達成！",
        category: PraiseCategory::Milestone,
        animation: Animation::Sparkle,
    },
    Milestone {
        at: 100,
        message: "100回達成！🎯 三桁の壁突破！",
        category: PraiseCategory::Milestone,
        animation: Animation::Rainbow,
    },
    Milestone {
        at: 200,
        message: "200回達成！🏆 継続の王者！",
        category: PraiseCategory::Master,
        animation: Animation::Fireworks,
    },
    Milestone {
        at: 365,
        message: "365回達成！🎊 1年分の記録！",
        category: PraiseCategory::Legendary,
        animation: Animation::Celebration,
    },
];

pub const DAILY_MESSAGES: &[&str] = &[
    "今日やってえらい！",
    "すごい！",
    "その調子！",
    "素晴らしい！",
    "よくやった！",
    "継続は力なり！",
];

/// Chooses which daily message to show. Must return an index below `len`.
pub trait MessagePicker {
    fn pick(&mut self, len: usize) -> usize;
}

pub struct RandomPicker<R> {
    rng: R,
}

impl RandomPicker<ThreadRng> {
    pub fn thread() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl RandomPicker<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> MessagePicker for RandomPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 { 0 } else { self.rng.gen_range(0..len) }
    }
}

pub fn classify_praise(
    current_streak: u32,
    total_records: u64,
    picker: &mut impl MessagePicker,
) -> MilestoneResult {
    let milestone = STREAK_MILESTONES
        .iter()
        .find(|m| m.at == u64::from(current_streak))
        .or_else(|| TOTAL_MILESTONES.iter().find(|m| m.at == total_records));

    if let Some(m) = milestone {
        return MilestoneResult {
            message: m.message.to_string(),
            category: m.category,
            animation: m.animation,
            is_milestone: true,
        };
    }

    streak_tier(current_streak).unwrap_or_else(|| {
        let index = picker.pick(DAILY_MESSAGES.len()).min(DAILY_MESSAGES.len() - 1);
        MilestoneResult {
            message: DAILY_MESSAGES[index].to_string(),
            category: PraiseCategory::Daily,
            animation: Animation::Bounce,
            is_milestone: false,
        }
    })
}

/// Thread-local randomness without a seed, `StdRng` with one.
pub fn classify_praise_seeded(
    current_streak: u32,
    total_records: u64,
    seed: Option<u64>,
) -> MilestoneResult {
    match seed {
        Some(seed) => {
            classify_praise(current_streak, total_records, &mut RandomPicker::seeded(seed))
        }
        None => classify_praise(current_streak, total_records, &mut RandomPicker::thread()),
    }
}

fn streak_tier(days: u32) -> Option<MilestoneResult> {
    let (message, category, animation) = match days {
        30.. => (
            format!("{days}日連続！もはや習慣！🎉"),
            PraiseCategory::StreakLong,
            Animation::Pulse,
        ),
        14.. => (
            format!("{days}日連続！すごすぎる！🔥"),
            PraiseCategory::StreakMedium,
            Animation::Pulse,
        ),
        7.. => (
            format!("{days}日連続！1週間達成！⭐"),
            PraiseCategory::StreakWeek,
            Animation::Bounce,
        ),
        3.. => (
            format!("{days}日連続！調子いいね！💪"),
            PraiseCategory::StreakShort,
            Animation::Bounce,
        ),
        2 => (
            format!("{days}日連続！その調子！👍"),
            PraiseCategory::StreakStart,
            Animation::Bounce,
        ),
        _ => return None,
    };
    Some(MilestoneResult {
        message,
        category,
        animation,
        is_milestone: false,
    })
}
