//! HTML fragment rendering / HTML 片段渲染
//!
//! The page shell is static; everything dynamic (index checkboxes, the
//! result count and the result cards) is rendered here and swapped into the
//! page by a few lines of browser glue. All document-derived text is
//! escaped before it reaches markup.

use serde_json::Value;

use crate::models::{IndexSummary, Pokemon};

/// Inline placeholder graphic used when a sprite fails to load; single
/// quotes are percent-encoded so the URI can sit inside a JS string.
const PLACEHOLDER_IMG: &str = "data:image/svg+xml;utf8,<svg xmlns=%27http://www.w3.org/2000/svg%27 width=%27120%27 height=%27120%27><rect width=%27120%27 height=%27120%27 fill=%27%23f0f0f0%27/><text x=%2750%%27 y=%2750%%27 dominant-baseline=%27middle%27 text-anchor=%27middle%27 font-size=%2748%27 fill=%27%23999%27>?</text></svg>";

/// Escape text for use in HTML content and attribute values / HTML 转义
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the index checkbox list; the default index comes pre-checked
/// / 渲染索引复选框，默认索引预先勾选
pub fn index_checkboxes(indexes: &[IndexSummary], default_index: &str) -> String {
    if indexes.is_empty() {
        return "<p>No indexes available</p>".to_string();
    }

    let mut html = String::new();
    for index in indexes {
        let id = escape_html(&index.id);
        let checked = if index.id == default_index { " checked" } else { "" };
        html.push_str(&format!(
            "<div class=\"index-checkbox\"><label>\
             <input type=\"checkbox\" name=\"index\" value=\"{id}\"{checked}> {id}\
             </label></div>",
        ));
    }
    html
}

/// Inline error shown in place of the checkbox list / 索引加载失败提示
pub fn index_error(message: &str) -> String {
    format!("<p>Error loading indexes: {}</p>", escape_html(message))
}

/// The `Found N results` line / 结果计数
fn count_line(total: u64) -> String {
    format!("<div id=\"result-count\">Found {} results</div>", total)
}

/// Render a full results fragment: count line plus cards, or the
/// no-results block / 渲染结果片段
pub fn results_fragment(hits: &[Value], total: u64) -> String {
    let mut html = count_line(total);

    if hits.is_empty() {
        html.push_str(
            "<div class=\"no-results\">\
             <p>No Pok\u{e9}mon found. Try searching for:</p>\
             <ul class=\"search-suggestions\">\
             <li><a href=\"#\" data-query=\"pikachu\">pikachu</a></li>\
             <li><a href=\"#\" data-query=\"steel\">steel</a></li>\
             <li><a href=\"#\" data-query=\"legendary\">legendary</a></li>\
             </ul></div>",
        );
        return html;
    }

    for hit in hits {
        // 文档字段缺失时降级渲染，绝不让单个坏文档毁掉整页
        let pokemon: Pokemon = serde_json::from_value(hit.clone()).unwrap_or_default();
        html.push_str(&pokemon_card(&pokemon));
    }
    html
}

/// Inline search error; the count resets to zero / 搜索错误提示，计数归零
pub fn error_fragment(message: &str) -> String {
    format!(
        "{}<p class=\"error\">Error: {}</p>",
        count_line(0),
        escape_html(message)
    )
}

fn pokemon_card(pokemon: &Pokemon) -> String {
    let name = escape_html(pokemon.name.as_deref().unwrap_or("Unknown"));

    let image = match pokemon.sprite_url() {
        Some(url) => format!(
            "<img src=\"{}\" alt=\"{}\" \
             onerror=\"this.onerror=null;this.src='{}';\">",
            escape_html(url),
            name,
            PLACEHOLDER_IMG
        ),
        None => "<div class=\"placeholder-image\">?</div>".to_string(),
    };

    let id_badge = pokemon
        .id
        .map(|id| format!(" <span class=\"pokemon-id\">#{}</span>", id))
        .unwrap_or_default();

    let type_badges: String = pokemon
        .type_names()
        .iter()
        .map(|t| {
            let t = escape_html(t);
            format!("<span class=\"type-badge type-{t}\">{t}</span>")
        })
        .collect();

    let species = escape_html(
        pokemon
            .species
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or("Unknown"),
    );

    // 分米转米、百克转千克，保留一位小数
    let height = pokemon
        .height
        .map(|h| format!("{:.1}m", h / 10.0))
        .unwrap_or_else(|| "Unknown".to_string());
    let weight = pokemon
        .weight
        .map(|w| format!("{:.1}kg", w / 10.0))
        .unwrap_or_else(|| "Unknown".to_string());

    let abilities = escape_html(&pokemon.abilities_text());

    let stat = |name: &str| -> String {
        pokemon
            .base_stat(name)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "?".to_string())
    };

    format!(
        "<div class=\"pokemon-card\">\
         <div class=\"pokemon-image\">{image}</div>\
         <div class=\"pokemon-info\">\
         <div class=\"pokemon-header\">\
         <h3>{name}{id_badge}</h3>\
         <div class=\"pokemon-types\">{type_badges}</div>\
         </div>\
         <div class=\"pokemon-details\">\
         <p><strong>Species:</strong> {species}</p>\
         <p><strong>Height:</strong> {height}</p>\
         <p><strong>Weight:</strong> {weight}</p>\
         <p><strong>Abilities:</strong> {abilities}</p>\
         </div>\
         <div class=\"pokemon-stats\">\
         <h4>Base Stats</h4>\
         <table class=\"stats-table\">\
         <tr><td>HP</td><td>Attack</td><td>Defense</td></tr>\
         <tr><td>{hp}</td><td>{attack}</td><td>{defense}</td></tr>\
         <tr><td>Sp. Atk</td><td>Sp. Def</td><td>Speed</td></tr>\
         <tr><td>{sp_atk}</td><td>{sp_def}</td><td>{speed}</td></tr>\
         </table></div></div></div>",
        hp = stat("hp"),
        attack = stat("attack"),
        defense = stat("defense"),
        sp_atk = stat("special-attack"),
        sp_def = stat("special-defense"),
        speed = stat("speed"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_hit() -> Value {
        json!({
            "name": "bulbasaur",
            "id": 1,
            "height": 7,
            "weight": 69,
            "species": { "name": "bulbasaur" },
            "sprites": {
                "front_default": "https://example.com/front/1.png",
                "other": { "official-artwork": { "front_default": "https://example.com/art/1.png" } }
            },
            "types": [
                { "slot": 2, "type": { "name": "poison" } },
                { "slot": 1, "type": { "name": "grass" } }
            ],
            "stats": [
                { "base_stat": 45, "stat": { "name": "hp" } },
                { "base_stat": 49, "stat": { "name": "attack" } },
                { "base_stat": 49, "stat": { "name": "defense" } },
                { "base_stat": 65, "stat": { "name": "special-attack" } },
                { "base_stat": 65, "stat": { "name": "special-defense" } },
                { "base_stat": 45, "stat": { "name": "speed" } }
            ],
            "abilities": [
                { "ability": { "name": "overgrow" }, "is_hidden": false },
                { "ability": { "name": "chlorophyll" }, "is_hidden": true }
            ]
        })
    }

    #[test]
    fn test_checkboxes_precheck_default_index() {
        let indexes = vec![
            IndexSummary { id: "pokemon".to_string() },
            IndexSummary { id: "items".to_string() },
        ];
        let html = index_checkboxes(&indexes, "pokemon");
        assert!(html.contains("value=\"pokemon\" checked"));
        assert!(html.contains("value=\"items\">"));
        assert!(!html.contains("value=\"items\" checked"));
    }

    #[test]
    fn test_checkboxes_empty_state() {
        assert_eq!(index_checkboxes(&[], "pokemon"), "<p>No indexes available</p>");
    }

    #[test]
    fn test_three_hits_render_three_cards() {
        let hits = vec![sample_hit(), sample_hit(), sample_hit()];
        let html = results_fragment(&hits, 3);
        assert!(html.contains("Found 3 results"));
        assert_eq!(html.matches("class=\"pokemon-card\"").count(), 3);
    }

    #[test]
    fn test_type_badges_ordered_by_slot() {
        let html = results_fragment(&[sample_hit()], 1);
        let grass = html.find("type-grass").unwrap();
        let poison = html.find("type-poison").unwrap();
        assert!(grass < poison);
    }

    #[test]
    fn test_missing_sprites_render_placeholder() {
        let hit = json!({ "name": "missingno", "id": 0 });
        let html = results_fragment(&[hit], 1);
        assert!(html.contains("<div class=\"placeholder-image\">?</div>"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_card_details_and_conversions() {
        let html = results_fragment(&[sample_hit()], 1);
        assert!(html.contains("<h3>bulbasaur <span class=\"pokemon-id\">#1</span></h3>"));
        assert!(html.contains("<strong>Height:</strong> 0.7m"));
        assert!(html.contains("<strong>Weight:</strong> 6.9kg"));
        assert!(html.contains("<strong>Abilities:</strong> overgrow (Hidden: chlorophyll)"));
        assert!(html.contains("https://example.com/art/1.png"));
    }

    #[test]
    fn test_missing_fields_degrade() {
        let html = results_fragment(&[json!({})], 1);
        assert!(html.contains("<h3>Unknown</h3>"));
        assert!(html.contains("<strong>Species:</strong> Unknown"));
        assert!(html.contains("<strong>Height:</strong> Unknown"));
        assert!(html.contains("<strong>Abilities:</strong> None"));
        // 六格数值全部为占位符
        assert_eq!(html.matches("<td>?</td>").count(), 6);
    }

    #[test]
    fn test_no_results_block_has_suggestions() {
        let html = results_fragment(&[], 0);
        assert!(html.contains("Found 0 results"));
        assert!(html.contains("data-query=\"pikachu\""));
        assert!(html.contains("data-query=\"steel\""));
        assert!(html.contains("data-query=\"legendary\""));
        assert!(!html.contains("pokemon-card"));
    }

    #[test]
    fn test_error_fragment_shows_message_and_zero_count() {
        let html = error_fragment("index not found");
        assert!(html.contains("Found 0 results"));
        assert!(html.contains("Error: index not found"));
        assert!(!html.contains("pokemon-card"));
    }

    #[test]
    fn test_document_text_is_escaped() {
        let hit = json!({ "name": "<script>alert(1)</script>" });
        let html = results_fragment(&[hit], 1);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
