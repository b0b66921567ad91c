//! Deterministic name rewriting for registry identifiers.
//!
//! All functions here are pure: they take the run options (or just the tag
//! vocabulary) and a source identifier and build a new string in a single
//! left-to-right scan. Registry identifiers are ASCII by construction, so
//! byte-position arithmetic below is safe.

use vkenums_core::GenOptions;

/// True if `s` ends with any configured extension tag.
pub fn has_tag_suffix(tags: &[String], s: &str) -> bool {
    tags.iter().any(|tag| s.ends_with(tag.as_str()))
}

/// Remove a trailing extension tag from `s`, optionally requiring an `_`
/// between the body and the tag. Tags are tried in configured order and the
/// first match wins, so ambiguous multi-tag suffixes resolve by priority.
pub fn strip_known_tag(tags: &[String], s: &str, require_underscore: bool) -> String {
    for tag in tags {
        let stripped = if require_underscore {
            s.strip_suffix(tag.as_str())
                .and_then(|rest| rest.strip_suffix('_'))
        } else {
            s.strip_suffix(tag.as_str())
        };
        if let Some(rest) = stripped {
            return rest.to_string();
        }
    }
    s.to_string()
}

fn is_upperish(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit()
}

/// Convert a mixed-case type name into the upper-snake key space used by raw
/// value names, e.g. `VkSampleCountFlagBits` -> `VK_SAMPLE_COUNT_`.
///
/// An underscore is inserted before each uppercase/digit run start that
/// follows a lowercase character; everything is uppercased; the embedded
/// `FLAG_BITS` marker (and the underscore after it, if any) is removed, since
/// flag-bit groups collapse into plain `Flags` enums. The underscore before a
/// trailing marker survives; prefix matching in [`transform_value_name`]
/// appends its own separator and relies on this exact shape.
pub fn structural_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len() + 8);
    let mut prev_upperish = true;
    for (i, ch) in name.chars().enumerate() {
        if is_upperish(ch) && i > 0 && !prev_upperish {
            key.push('_');
            key.push(ch);
        } else {
            key.push(ch.to_ascii_uppercase());
        }
        prev_upperish = is_upperish(ch);
    }
    if let Some(pos) = key.find("FLAG_BITS") {
        let mut end = pos + "FLAG_BITS".len();
        if key.as_bytes().get(end) == Some(&b'_') {
            end += 1;
        }
        key.replace_range(pos..end, "");
    }
    key
}

/// Transform an enum type name from its registry form to the output form.
pub fn transform_type_name(options: &GenOptions, name: &str) -> String {
    // FlagBits groups and their Flags typedef become one enum here.
    let mut out = name.replacen("FlagBits", "Flags", 1);
    if let Some(rest) = out.strip_prefix("Vk") {
        out = format!("{}{rest}", options.name_prefix_replacement);
    }
    if options.name_remove_postfix {
        out = strip_known_tag(&options.tag_names, &out, false);
    }
    out
}

/// Transform a raw value name, using the owning enum's *untransformed* name
/// to locate the repeated structural prefix.
pub fn transform_value_name(
    options: &GenOptions,
    raw: &str,
    owning_original_name: &str,
    allow_leading_digit: bool,
) -> String {
    let mut name = if options.remove_structure_names {
        let mut key = structural_key(owning_original_name);
        // The tag is stripped from the key up front; otherwise it could eat
        // into value text that starts with the same letters (ERROR vs EXT).
        key = strip_known_tag(&options.tag_names, &key, false);
        key.push('_');
        // Longest common leading run, compared at the same index on both
        // sides. A value name may share only a partial prefix with the key,
        // so this must stop at the first mismatch, never substring-search.
        let shared = raw
            .bytes()
            .zip(key.bytes())
            .take_while(|(a, b)| a == b)
            .count();
        raw[shared..].to_string()
    } else {
        raw.strip_prefix("VK_").unwrap_or(raw).to_string()
    };

    name.insert_str(0, &options.value_prefix_replacement);
    let prefix_len = options.value_prefix_replacement.len();

    // Tag-suffixed (extension-origin) and core enums carry independent
    // postfix-removal flags.
    let strip_value_tag = if has_tag_suffix(&options.tag_names, owning_original_name) {
        options.value_remove_postfix
    } else {
        options.value_remove_postfix_core_types
    };
    if strip_value_tag {
        name = strip_known_tag(&options.tag_names, &name, true);
    }

    if options.to_lower {
        let (head, tail) = name.split_at(prefix_len);
        name = format!("{head}{}", tail.to_ascii_lowercase());
    }

    if options.capitalize_start {
        let mut out = String::with_capacity(name.len());
        let mut prev: Option<char> = None;
        for (i, ch) in name.chars().enumerate() {
            let at_start = i == prefix_len;
            let after_break = prev.is_some_and(|p| p == '_' || p.is_ascii_digit());
            if i >= prefix_len && (at_start || after_break) {
                out.push(ch.to_ascii_uppercase());
            } else {
                out.push(ch);
            }
            prev = Some(ch);
        }
        name = out;
    }

    if options.remove_underscores {
        let (head, tail) = name.split_at(prefix_len);
        let mut out = String::with_capacity(name.len());
        out.push_str(head);
        out.extend(tail.chars().filter(|c| *c != '_'));
        name = out;
    }

    // Identifiers may not begin with a digit in the output language.
    if !allow_leading_digit && name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        name.insert_str(0, &options.number_prefix);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn full_options() -> GenOptions {
        GenOptions {
            remove_structure_names: true,
            to_lower: true,
            capitalize_start: true,
            remove_underscores: true,
            value_remove_postfix: true,
            value_remove_postfix_core_types: true,
            number_prefix: "e".to_string(),
            tag_names: tags(&["KHR", "EXT", "AMD"]),
            ..GenOptions::default()
        }
    }

    #[test]
    fn structural_key_inserts_underscores_at_case_breaks() {
        assert_eq!(structural_key("VkColorSpaceKHR"), "VK_COLOR_SPACE_KHR");
        // Continuously capitalized runs are not split further.
        assert_eq!(structural_key("VkASTCDecodeMode"), "VK_ASTCDECODE_MODE");
    }

    #[test]
    fn structural_key_drops_flag_bits_marker() {
        // A trailing marker leaves its leading underscore in place; the
        // prefix comparison in transform_value_name expects that shape.
        assert_eq!(structural_key("VkSampleCountFlagBits"), "VK_SAMPLE_COUNT_");
        // An embedded marker takes its following underscore with it.
        assert_eq!(
            structural_key("VkDebugReportFlagBitsEXT"),
            "VK_DEBUG_REPORT_EXT"
        );
    }

    #[test]
    fn tag_stripping_is_first_match_in_configured_order() {
        // Priority is the configured order, pinned here so that a shorter
        // tag being a suffix of a longer one stays order-dependent.
        let ordered = tags(&["RKHR", "KHR"]);
        assert_eq!(strip_known_tag(&ordered, "VK_THING_RKHR", false), "VK_THING_");
        let reversed = tags(&["KHR", "RKHR"]);
        assert_eq!(strip_known_tag(&reversed, "VK_THING_RKHR", false), "VK_THING_R");
    }

    #[test]
    fn tag_stripping_can_require_underscore_boundary() {
        let t = tags(&["KHR"]);
        assert_eq!(strip_known_tag(&t, "SURFACE_LOST_KHR", true), "SURFACE_LOST");
        // No underscore before the tag: left untouched.
        assert_eq!(strip_known_tag(&t, "SURFACEKHR", true), "SURFACEKHR");
        assert_eq!(strip_known_tag(&t, "SURFACEKHR", false), "SURFACE");
    }

    #[test]
    fn no_match_leaves_string_unchanged() {
        let t = tags(&["KHR", "EXT"]);
        assert_eq!(strip_known_tag(&t, "VK_SUCCESS", true), "VK_SUCCESS");
        assert!(!has_tag_suffix(&t, "VK_SUCCESS"));
        assert!(has_tag_suffix(&t, "VkColorSpaceKHR"));
    }

    #[test]
    fn type_name_collapses_flag_bits_and_swaps_prefix() {
        let options = GenOptions {
            name_prefix_replacement: String::new(),
            ..GenOptions::default()
        };
        assert_eq!(
            transform_type_name(&options, "VkSampleCountFlagBits"),
            "SampleCountFlags"
        );

        let prefixed = GenOptions {
            name_prefix_replacement: "Gfx".to_string(),
            ..GenOptions::default()
        };
        assert_eq!(transform_type_name(&prefixed, "VkResult"), "GfxResult");
    }

    #[test]
    fn type_name_postfix_removal_is_opt_in() {
        let options = GenOptions {
            name_remove_postfix: true,
            tag_names: tags(&["KHR"]),
            ..GenOptions::default()
        };
        assert_eq!(transform_type_name(&options, "VkColorSpaceKHR"), "ColorSpace");
    }

    #[test]
    fn noop_options_only_strip_the_fixed_prefix() {
        let options = GenOptions::default();
        assert_eq!(
            transform_value_name(&options, "VK_SUCCESS", "VkResult", false),
            "SUCCESS"
        );
        // Already-stripped input passes through untouched.
        assert_eq!(
            transform_value_name(&options, "SUCCESS", "VkResult", false),
            "SUCCESS"
        );
    }

    #[test]
    fn structure_name_stripping_removes_repeated_type_prefix() {
        let options = GenOptions {
            remove_structure_names: true,
            tag_names: tags(&["KHR", "EXT"]),
            ..GenOptions::default()
        };
        assert_eq!(
            transform_value_name(&options, "VK_IMAGE_LAYOUT_GENERAL", "VkImageLayout", false),
            "GENERAL"
        );
        // Bit groups: the FLAG_BITS marker is gone from the key, so the
        // shared prefix still matches.
        assert_eq!(
            transform_value_name(
                &options,
                "VK_SAMPLE_COUNT_2_BIT",
                "VkSampleCountFlagBits",
                true
            ),
            "2_BIT"
        );
    }

    #[test]
    fn structure_name_stripping_stops_at_first_mismatch() {
        let options = GenOptions {
            remove_structure_names: true,
            ..GenOptions::default()
        };
        // Key is VK_RESULT_; value shares only VK_ with it. The comparison
        // must stop at the mismatch instead of hunting for a substring.
        assert_eq!(
            transform_value_name(&options, "VK_SUCCESS", "VkResult", false),
            "SUCCESS"
        );
    }

    #[test]
    fn tag_on_key_does_not_eat_matching_value_text() {
        let options = GenOptions {
            remove_structure_names: true,
            tag_names: tags(&["EXT"]),
            ..GenOptions::default()
        };
        // ERROR starts with the same letter as EXT; the key must have its
        // tag removed before comparison so the E of ERROR survives.
        assert_eq!(
            transform_value_name(
                &options,
                "VK_DEBUG_REPORT_ERROR_BIT_EXT",
                "VkDebugReportFlagBitsEXT",
                false
            ),
            "ERROR_BIT_EXT"
        );
    }

    #[test]
    fn full_pipeline_produces_camel_case() {
        let options = full_options();
        assert_eq!(
            transform_value_name(&options, "VK_IMAGE_LAYOUT_GENERAL", "VkImageLayout", false),
            "General"
        );
        assert_eq!(
            transform_value_name(
                &options,
                "VK_IMAGE_LAYOUT_DEPTH_STENCIL_READ_ONLY_OPTIMAL",
                "VkImageLayout",
                false
            ),
            "DepthStencilReadOnlyOptimal"
        );
    }

    #[test]
    fn leading_digits_get_the_number_prefix() {
        let options = full_options();
        assert_eq!(
            transform_value_name(&options, "VK_SAMPLE_COUNT_2_BIT", "VkSampleCountFlagBits", false),
            "e2Bit"
        );
        assert_eq!(
            transform_value_name(&options, "VK_SAMPLE_COUNT_2_BIT", "VkSampleCountFlagBits", true),
            "2Bit"
        );
    }

    #[test]
    fn capitalize_start_uppercases_after_underscores_and_digits() {
        let options = GenOptions {
            to_lower: true,
            capitalize_start: true,
            ..GenOptions::default()
        };
        assert_eq!(
            transform_value_name(&options, "VK_ERROR_UNKNOWN", "VkResult", false),
            "Error_Unknown"
        );
    }

    #[test]
    fn value_prefix_is_not_rewritten_by_later_stages() {
        let options = GenOptions {
            value_prefix_replacement: "e_".to_string(),
            to_lower: true,
            remove_underscores: true,
            ..GenOptions::default()
        };
        // The inserted prefix keeps its underscore and casing.
        assert_eq!(
            transform_value_name(&options, "VK_SUCCESS", "VkResult", false),
            "e_success"
        );
    }

    #[test]
    fn core_and_extension_tag_removal_are_independent() {
        let core_only = GenOptions {
            value_remove_postfix_core_types: true,
            tag_names: tags(&["KHR"]),
            ..GenOptions::default()
        };
        // Owner VkResult carries no tag: the core flag applies.
        assert_eq!(
            transform_value_name(&core_only, "VK_ERROR_SURFACE_LOST_KHR", "VkResult", false),
            "ERROR_SURFACE_LOST"
        );
        // Owner VkColorSpaceKHR is tagged: only value_remove_postfix applies,
        // and it is off here.
        assert_eq!(
            transform_value_name(
                &core_only,
                "VK_COLOR_SPACE_DISPLAY_P3_LINEAR_KHR",
                "VkColorSpaceKHR",
                false
            ),
            "COLOR_SPACE_DISPLAY_P3_LINEAR_KHR"
        );
    }
}
