//! Motivational messages keyed by glass count.

/// One entry per count from 0 through the daily goal, in order.
pub const MOTIVATIONAL_MESSAGES: [&str; 9] = [
    "🌟 Start your hydration journey!",
    "💪 Great start! Keep it up!",
    "🎯 You're building momentum!",
    "🔥 Halfway there! You're doing amazing!",
    "⚡ More than halfway! Keep pushing!",
    "🚀 You're on fire! Almost there!",
    "🏆 So close to your goal! One more push!",
    "🎉 Final stretch! You've got this!",
    "🌈 Goal achieved! You're a hydration champion!",
];

/// Shown for any count without a table entry.
pub const FALLBACK_MESSAGE: &str = "Keep going! 💪";

/// Look up the message for an exact glass count.
pub fn message_for(count: u32) -> &'static str {
    usize::try_from(count)
        .ok()
        .and_then(|index| MOTIVATIONAL_MESSAGES.get(index))
        .copied()
        .unwrap_or(FALLBACK_MESSAGE)
}
