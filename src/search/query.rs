//! Query normalization / 查询改写
//!
//! Plain words typed into the search box are rewritten into Quickwit field
//! queries. Anything that already contains a `:` is assumed to be a field
//! query and passes through untouched.

/// The eighteen elemental type names / 十八种属性
pub const POKEMON_TYPES: [&str; 18] = [
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

/// Rewrite a raw query into backend field-query syntax / 改写为字段查询
///
/// Plain terms become a disjunction over the name field and the full-text
/// field. A term matching a type name, `legendary` or `mythical` becomes an
/// equality query on the corresponding field instead; the checks run in that
/// order and a later match overwrites an earlier one.
pub fn format_query(query: &str) -> String {
    let query = query.trim();

    if query.contains(':') {
        return query.to_string();
    }

    let lower = query.to_lowercase();

    // 简单关键词：同时查 name 和全文字段
    let mut formatted = format!("documents.name:{} OR documents._all_text:{}", query, query);

    // 属性名直接查 types 字段
    if POKEMON_TYPES.contains(&lower.as_str()) {
        formatted = format!("types:{}", query);
    }

    // 传说/幻兽标记
    if lower == "legendary" {
        formatted = "is_legendary:true".to_string();
    } else if lower == "mythical" {
        formatted = "is_mythical:true".to_string();
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_query_passes_through() {
        assert_eq!(format_query("types:fire"), "types:fire");
        assert_eq!(format_query("documents.name:pikachu"), "documents.name:pikachu");
        assert_eq!(format_query("is_legendary:false"), "is_legendary:false");
    }

    #[test]
    fn test_plain_term_becomes_disjunction() {
        assert_eq!(
            format_query("pikachu"),
            "documents.name:pikachu OR documents._all_text:pikachu"
        );
        assert_eq!(
            format_query("  charizard  "),
            "documents.name:charizard OR documents._all_text:charizard"
        );
    }

    #[test]
    fn test_all_type_names_rewrite_to_types_field() {
        for name in POKEMON_TYPES {
            assert_eq!(format_query(name), format!("types:{}", name));
        }
    }

    #[test]
    fn test_type_name_keeps_original_case() {
        assert_eq!(format_query("Steel"), "types:Steel");
        assert_eq!(format_query("FIRE"), "types:FIRE");
    }

    #[test]
    fn test_legendary_and_mythical_flags() {
        assert_eq!(format_query("legendary"), "is_legendary:true");
        assert_eq!(format_query("Legendary"), "is_legendary:true");
        assert_eq!(format_query("mythical"), "is_mythical:true");
        assert_eq!(format_query("MYTHICAL"), "is_mythical:true");
    }

    #[test]
    fn test_non_special_word_not_rewritten() {
        assert_eq!(
            format_query("shadow"),
            "documents.name:shadow OR documents._all_text:shadow"
        );
    }
}
