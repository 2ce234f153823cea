// embed.rs - Embed Field Construction Helpers
// Shared support for turning a set of named entries into embed fields,
// with the field title and body derived through caller-supplied closures.
//
// Used by: commands/code.rs, commands/help.rs, commands/panel.rs

use serenity::builder::CreateEmbed;

/// Append one embed field per entry.
///
/// `map_title` and `map_value` are the display strategies: they turn an
/// entry's key and value into the field title and body. Entries are added
/// in iteration order, so callers control field ordering.
pub fn add_mapped_fields<K, V, I, FT, FV>(
    embed: &mut CreateEmbed,
    entries: I,
    map_title: FT,
    map_value: FV,
    inline: bool,
) -> &mut CreateEmbed
where
    I: IntoIterator<Item = (K, V)>,
    FT: Fn(&K) -> String,
    FV: Fn(&V) -> String,
{
    for (key, value) in entries {
        embed.field(map_title(&key), map_value(&value), inline);
    }
    embed
}

/// Extract (title, body) pairs from a built embed, in order.
#[cfg(test)]
pub(crate) fn fields_of(embed: &CreateEmbed) -> Vec<(String, String)> {
    embed
        .0
        .get("fields")
        .and_then(|value| value.as_array())
        .map(|fields| {
            fields
                .iter()
                .map(|field| {
                    (
                        field
                            .get("name")
                            .and_then(|name| name.as_str())
                            .unwrap_or_default()
                            .to_string(),
                        field
                            .get("value")
                            .and_then(|body| body.as_str())
                            .unwrap_or_default()
                            .to_string(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_fields_apply_strategies_in_order() {
        let mut embed = CreateEmbed::default();
        add_mapped_fields(
            &mut embed,
            vec![("b", 2usize), ("a", 1usize)],
            |name| name.to_uppercase(),
            |count| format!("`{}` items", count),
            false,
        );

        let fields = fields_of(&embed);
        assert_eq!(
            fields,
            vec![
                ("B".to_string(), "`2` items".to_string()),
                ("A".to_string(), "`1` items".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_entries_means_no_fields() {
        let mut embed = CreateEmbed::default();
        let empty: Vec<(String, String)> = Vec::new();
        add_mapped_fields(&mut embed, empty, |t| t.clone(), |v| v.clone(), true);
        assert!(fields_of(&embed).is_empty());
    }
}
