//! Category id → category name lookup.
//!
//! The feed client sends numeric category ids; catalog rows carry names.

/// The fixed category taxonomy, as (id, name)
pub const CATEGORIES: [(&str, &str); 12] = [
    ("2", "Vible"),
    ("4", "E/ACC"),
    ("3", "The Igloo"),
    ("20", "OvaDrive"),
    ("22", "SolTok"),
    ("25", "Super Feed"),
    ("5", "Gratitube"),
    ("8", "Bloom Scroll"),
    ("18", "Startup College"),
    ("21", "Pumptok"),
    ("6", "InstaRama"),
    ("13", "Flic"),
];

/// Map a category id to its name.
///
/// Unknown and absent ids both resolve to `None`, which means "no category
/// filter".
pub fn resolve_category(category_id: Option<&str>) -> Option<&'static str> {
    let category_id = category_id?;
    CATEGORIES
        .iter()
        .find(|(id, _)| *id == category_id)
        .map(|(_, name)| *name)
}
