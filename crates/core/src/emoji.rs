//! Title → icon heuristic.
//!
//! Each word of the title is looked up as a substring of the emoji
//! short names in [`EMOJI_NAMES`]; the first word with any hit decides
//! the icon. The table is an ordered slice so the outcome only depends
//! on the title.

/// Icon used when no title word matches an emoji name.
pub const DEFAULT_ICON: &str = "🎬";

/// Fragments removed from the lower-cased title before tokenizing.
///
/// Removal is by substring, so `"the"` is also stripped from inside
/// longer words such as `"theory"`.
pub const STOP_WORDS: [&str; 4] = ["the", "and", ",", "."];

/// Emoji short names and glyphs, scanned in order.
pub const EMOJI_NAMES: &[(&str, &str)] = &[
    ("alien", "👽"),
    ("alien_monster", "👾"),
    ("ambulance", "🚑"),
    ("anchor", "⚓"),
    ("angel", "👼"),
    ("ant", "🐜"),
    ("apple", "🍎"),
    ("baby", "👶"),
    ("balloon", "🎈"),
    ("banana", "🍌"),
    ("bat", "🦇"),
    ("bear", "🐻"),
    ("bee", "🐝"),
    ("beer", "🍺"),
    ("bell", "🔔"),
    ("bicycle", "🚲"),
    ("bird", "🐦"),
    ("birthday_cake", "🎂"),
    ("boat", "⛵"),
    ("bomb", "💣"),
    ("book", "📖"),
    ("boxing_glove", "🥊"),
    ("brain", "🧠"),
    ("bridge_at_night", "🌉"),
    ("broken_heart", "💔"),
    ("bug", "🐛"),
    ("bus", "🚌"),
    ("butterfly", "🦋"),
    ("cactus", "🌵"),
    ("camera", "📷"),
    ("car", "🚗"),
    ("castle", "🏰"),
    ("cat", "🐱"),
    ("chicken", "🐔"),
    ("christmas_tree", "🎄"),
    ("city_sunset", "🌆"),
    ("clown_face", "🤡"),
    ("coffee", "☕"),
    ("computer", "💻"),
    ("cow", "🐮"),
    ("crab", "🦀"),
    ("crocodile", "🐊"),
    ("crown", "👑"),
    ("crystal_ball", "🔮"),
    ("dagger", "🗡️"),
    ("dancer", "💃"),
    ("deer", "🦌"),
    ("desert", "🏜️"),
    ("detective", "🕵️"),
    ("diamond", "💎"),
    ("dinosaur", "🦕"),
    ("dog", "🐶"),
    ("dolphin", "🐬"),
    ("door", "🚪"),
    ("dragon", "🐉"),
    ("dragon_face", "🐲"),
    ("duck", "🦆"),
    ("eagle", "🦅"),
    ("earth_americas", "🌎"),
    ("elephant", "🐘"),
    ("eye", "👁️"),
    ("fairy", "🧚"),
    ("family", "👪"),
    ("fire", "🔥"),
    ("fish", "🐟"),
    ("flag_white", "🏳️"),
    ("flower_playing_cards", "🎴"),
    ("football", "🏈"),
    ("fox_face", "🦊"),
    ("frog", "🐸"),
    ("game_die", "🎲"),
    ("genie", "🧞"),
    ("ghost", "👻"),
    ("gift", "🎁"),
    ("girl", "👧"),
    ("globe_with_meridians", "🌐"),
    ("gorilla", "🦍"),
    ("guitar", "🎸"),
    ("gun", "🔫"),
    ("hammer", "🔨"),
    ("heart", "❤️"),
    ("helicopter", "🚁"),
    ("horse", "🐴"),
    ("hospital", "🏥"),
    ("hourglass", "⌛"),
    ("house", "🏠"),
    ("ice_cream", "🍨"),
    ("island", "🏝️"),
    ("jack_o_lantern", "🎃"),
    ("joker", "🃏"),
    ("key", "🔑"),
    ("knife", "🔪"),
    ("lion_face", "🦁"),
    ("lock", "🔒"),
    ("love_letter", "💌"),
    ("mage", "🧙"),
    ("man", "👨"),
    ("mask", "🎭"),
    ("microphone", "🎤"),
    ("money_bag", "💰"),
    ("monkey", "🐒"),
    ("moon", "🌙"),
    ("mountain", "⛰️"),
    ("mouse", "🐭"),
    ("movie_camera", "🎥"),
    ("mushroom", "🍄"),
    ("musical_note", "🎵"),
    ("night_with_stars", "🌃"),
    ("ninja", "🥷"),
    ("ocean", "🌊"),
    ("octopus", "🐙"),
    ("owl", "🦉"),
    ("panda_face", "🐼"),
    ("penguin", "🐧"),
    ("pig", "🐷"),
    ("pirate_flag", "🏴‍☠️"),
    ("pizza", "🍕"),
    ("police_car", "🚓"),
    ("princess", "👸"),
    ("rabbit", "🐰"),
    ("rainbow", "🌈"),
    ("rat", "🐀"),
    ("ring", "💍"),
    ("robot", "🤖"),
    ("rocket", "🚀"),
    ("rose", "🌹"),
    ("running", "🏃"),
    ("santa", "🎅"),
    ("school", "🏫"),
    ("scorpion", "🦂"),
    ("shark", "🦈"),
    ("ship", "🚢"),
    ("skull", "💀"),
    ("snake", "🐍"),
    ("snowflake", "❄️"),
    ("snowman", "⛄"),
    ("soccer", "⚽"),
    ("spider", "🕷️"),
    ("spider_web", "🕸️"),
    ("star", "⭐"),
    ("statue_of_liberty", "🗽"),
    ("sun", "☀️"),
    ("superhero", "🦸"),
    ("sword", "⚔️"),
    ("taxi", "🚕"),
    ("tiger", "🐯"),
    ("tornado", "🌪️"),
    ("tractor", "🚜"),
    ("train", "🚆"),
    ("trophy", "🏆"),
    ("turtle", "🐢"),
    ("unicorn", "🦄"),
    ("vampire", "🧛"),
    ("volcano", "🌋"),
    ("whale", "🐳"),
    ("wine_glass", "🍷"),
    ("wolf", "🐺"),
    ("woman", "👩"),
    ("world_map", "🗺️"),
    ("zombie", "🧟"),
];

/// Pick a representative icon for a title.
///
/// ```
/// use reelsync_core::emoji::{select_emoji, DEFAULT_ICON};
///
/// assert_eq!(select_emoji("The Lion King"), "🦁");
/// assert_eq!(select_emoji("Inception"), DEFAULT_ICON);
/// ```
pub fn select_emoji(title: &str) -> &'static str {
    select_from(title, EMOJI_NAMES)
}

/// [`select_emoji`] against an arbitrary ordered table.
pub fn select_from(title: &str, table: &[(&str, &'static str)]) -> &'static str {
    let mut cleaned = title.to_lowercase();
    for word in STOP_WORDS {
        cleaned = cleaned.replace(word, "");
    }

    cleaned
        .split_whitespace()
        .find_map(|token| {
            table
                .iter()
                .find(|(name, _)| name.contains(token))
                .map(|&(_, glyph)| glyph)
        })
        .unwrap_or(DEFAULT_ICON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lion_king_picks_lion() {
        assert_eq!(select_emoji("The Lion King"), "🦁");
    }

    #[test]
    fn no_match_returns_default() {
        assert_eq!(select_emoji("Inception"), DEFAULT_ICON);
        assert_eq!(select_emoji(""), DEFAULT_ICON);
        assert_eq!(select_emoji("   "), DEFAULT_ICON);
    }

    #[test]
    fn first_matching_token_wins() {
        // "shark" appears before "tornado" in the title.
        assert_eq!(select_emoji("Shark Tornado"), "🦈");
        assert_eq!(select_emoji("Tornado Shark"), "🌪️");
    }

    #[test]
    fn first_table_entry_wins_for_a_token() {
        // "dragon" is a substring of both "dragon" and "dragon_face".
        assert_eq!(select_emoji("Dragon Heart"), "🐉");
        // "to" hits "octopus" long before "tornado".
        assert_eq!(select_emoji("To Kill"), "🐙");
    }

    #[test]
    fn match_is_substring_of_name() {
        // "face" only occurs inside longer names.
        let table = [("clown_face", "🤡"), ("lion_face", "🦁")];
        assert_eq!(select_from("Face Off", &table), "🤡");
    }

    #[test]
    fn stop_words_are_removed_as_substrings() {
        let table = [("ory", "X"), ("theory", "Y")];
        // "theory" loses its "the" and becomes "ory".
        assert_eq!(select_from("Theory", &table), "X");
    }

    #[test]
    fn punctuation_is_stripped_before_split() {
        let table = [("bear", "🐻")];
        assert_eq!(select_from("Bear, Inc.", &table), "🐻");
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(select_emoji("ROBOT WARS"), "🤖");
    }
}
