//! Static instruction text keyed by theme and difficulty.
//!
//! The table is an exhaustive `match`, so every (theme, difficulty) pair
//! resolves to an instruction at compile time.

use crate::{Difficulty, Theme};
use rand::Rng;
use rand::seq::SliceRandom;
use strum::IntoEnumIterator;

/// Title openers for generated groups.
pub const INTRO_HOOKS: &[&str] = &[
    "5 Questions to Ask Your Partner Tonight",
    "Brave Questions for Couples",
    "5 Things to Ask Your Partner Before Bed",
    "5 Deep Questions to Spark Intimacy",
    "Surprising Questions for You and Your Partner",
    "5 Quick Prompts to Reconnect as a Couple",
    "How Well Do You Know Your Partner?",
    "Try These 5 Questions With Your Person",
    "Questions Every Couple Should Try Together",
];

/// Theme → difficulty → instruction lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptTable;

impl PromptTable {
    /// Instruction text handed to the question generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use twain_core::{Difficulty, PromptTable, Theme};
    ///
    /// let text = PromptTable::instruction(Theme::Dreams, Difficulty::Deep);
    /// assert!(text.contains("future"));
    /// ```
    pub fn instruction(theme: Theme, difficulty: Difficulty) -> &'static str {
        use Difficulty::*;
        use Theme::*;
        match (theme, difficulty) {
            (Communication, Light) => {
                "Write easy, friendly questions a couple can ask each other about how they like to talk, text and check in during the day."
            }
            (Communication, Medium) => {
                "Write questions that help partners understand how each of them handles disagreements, stress and asking for what they need."
            }
            (Communication, Deep) => {
                "Write honest questions about the things partners find hardest to say to each other and what would make those conversations feel safe."
            }
            (Intimacy, Light) => {
                "Write warm, playful questions about small gestures of affection each partner enjoys giving and receiving."
            }
            (Intimacy, Medium) => {
                "Write questions that explore when each partner feels most connected, seen and cared for in the relationship."
            }
            (Intimacy, Deep) => {
                "Write vulnerable questions about emotional closeness, trust and the moments partners felt truly known by each other."
            }
            (Memories, Light) => {
                "Write nostalgic questions about fun shared moments, first dates and favourite trips a couple has taken together."
            }
            (Memories, Medium) => {
                "Write questions that invite partners to share childhood memories and family traditions that shaped who they are."
            }
            (Memories, Deep) => {
                "Write reflective questions about turning points, regrets and hard seasons that changed each partner's outlook on love."
            }
            (Dreams, Light) => {
                "Write lighthearted questions about dream vacations, bucket-list adventures and the perfect lazy weekend together."
            }
            (Dreams, Medium) => {
                "Write questions about career hopes, where partners want to live and the life they picture building together."
            }
            (Dreams, Deep) => {
                "Write searching questions about the future each partner is afraid to want, legacy and what a fulfilled life means to them."
            }
            (Playful, Light) => {
                "Write silly would-you-rather and hypothetical questions a couple can laugh about together."
            }
            (Playful, Medium) => {
                "Write playful questions that reveal quirky habits, secret talents and guilty pleasures partners may not have shared yet."
            }
            (Playful, Deep) => {
                "Write imaginative questions that use fun scenarios to uncover what partners truly value in each other."
            }
            (Values, Light) => {
                "Write gentle questions about everyday priorities like money habits, friendships and how partners like to spend free time."
            }
            (Values, Medium) => {
                "Write questions about beliefs, boundaries and the principles each partner wants their relationship to stand on."
            }
            (Values, Deep) => {
                "Write profound questions about faith, purpose, forgiveness and the values partners would never compromise on."
            }
        }
    }

    /// Every (theme, difficulty) pair with its instruction.
    pub fn entries() -> impl Iterator<Item = (Theme, Difficulty, &'static str)> {
        Theme::iter().flat_map(|theme| {
            Difficulty::iter().map(move |difficulty| {
                (theme, difficulty, Self::instruction(theme, difficulty))
            })
        })
    }
}

/// Pick a title opener.
pub fn intro_hook_with<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    INTRO_HOOKS.choose(rng).copied().unwrap_or(INTRO_HOOKS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_total_and_non_empty() {
        let entries: Vec<_> = PromptTable::entries().collect();
        assert_eq!(entries.len(), Theme::iter().count() * Difficulty::iter().count());
        for (theme, difficulty, text) in entries {
            assert!(!text.trim().is_empty(), "{theme}/{difficulty} has no instruction");
        }
    }
}
