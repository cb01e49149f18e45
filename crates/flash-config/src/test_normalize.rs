#[cfg(test)]
mod tests {
    use crate::*;

    fn parse(text: &str) -> CanonicalConfig {
        parse_document(text)
    }

    #[test]
    fn legacy_nested_section_text_yields_one_text_section() {
        let cfg = parse(
            r#"
section:
  text:
    content: Hello
    color: white
    style:
      bold: true
      align:
        horizontal: center
        vertical: middle
"#,
        );
        assert_eq!(cfg.sections.len(), 1);
        let SectionSpec::Text(t) = &cfg.sections[0] else {
            panic!("expected text section");
        };
        assert_eq!(t.content, "Hello");
        assert_eq!(t.color.as_deref(), Some("white"));
        assert!(t.style.bold);
        assert_eq!(t.style.align.horizontal.as_deref(), Some("center"));
        assert_eq!(t.style.align.vertical.as_deref(), Some("middle"));
    }

    #[test]
    fn legacy_section_map_keys_become_bits_in_order() {
        let cfg = parse(
            r#"
section:
  text:
    content: intro
  gallery:
    id: g1
  footer: {}
"#,
        );
        let names: Vec<&str> = cfg
            .sections
            .iter()
            .map(|s| match s {
                SectionSpec::Text(_) => "text",
                SectionSpec::Bit(b) => b.name.as_str(),
            })
            .collect();
        assert_eq!(names, vec!["text", "gallery", "footer"]);
    }

    #[test]
    fn sections_array_mixed_shorthands() {
        let cfg = parse(
            r#"
sections:
  - type: text
    content: one
  - type: gallery
    config:
      id: g
  - type: chart
    options:
      kind: bar
  - type: ticker
    speed: 3
  - text:
      content: two
  - card:
      title: hi
"#,
        );
        assert_eq!(cfg.sections.len(), 6);
        match &cfg.sections[1] {
            SectionSpec::Bit(b) => {
                assert_eq!(b.name, "gallery");
                assert_eq!(b.config.get("id").and_then(|v| v.as_str()), Some("g"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        match &cfg.sections[2] {
            SectionSpec::Bit(b) => {
                assert_eq!(b.config.get("kind").and_then(|v| v.as_str()), Some("bar"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        // Typed entry without config/options carries itself.
        match &cfg.sections[3] {
            SectionSpec::Bit(b) => {
                assert_eq!(b.config.get("speed").and_then(|v| v.as_u64()), Some(3));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(&cfg.sections[4], SectionSpec::Text(t) if t.content == "two"));
        assert!(matches!(&cfg.sections[5], SectionSpec::Bit(b) if b.name == "card"));
    }

    #[test]
    fn single_key_objects_default_to_bit_unless_text() {
        let cfg = parse("sections:\n  - banner: {}\n  - text:\n      content: t\n");
        assert!(matches!(&cfg.sections[0], SectionSpec::Bit(b) if b.name == "banner"));
        assert!(matches!(&cfg.sections[1], SectionSpec::Text(_)));
    }

    #[test]
    fn bare_string_text_is_the_content_shorthand() {
        let cfg = parse("sections:\n  - text: just words\n");
        let SectionSpec::Text(t) = &cfg.sections[0] else {
            panic!("expected text section");
        };
        assert_eq!(t.content, "just words");
        assert!(!t.style.bold);
    }

    #[test]
    fn malformed_text_never_raises_and_yields_empty_config() {
        for text in ["{unclosed", ":", "\t- bad", "sections: 12", "section: []"] {
            let cfg = parse(text);
            assert!(cfg.sections.is_empty(), "input {text:?}");
            assert_eq!(cfg.background, Background::default());
            assert!(cfg.metadata.is_empty());
        }
    }

    #[test]
    fn background_metadata_and_custom_extracted() {
        let cfg = parse(
            r##"
background:
  color: "#abc"
  image: bg.png
metadata:
  title: My Page
  author: someone
  skipped: [not, a, string]
custom:
  css: "body{}"
  js: "noop()"
"##,
        );
        assert_eq!(cfg.background.color.as_deref(), Some("#abc"));
        assert_eq!(cfg.background.image.as_deref(), Some("bg.png"));
        assert_eq!(cfg.metadata.get("title").map(String::as_str), Some("My Page"));
        assert!(!cfg.metadata.contains_key("skipped"));
        assert_eq!(cfg.custom.css.as_deref(), Some("body{}"));
        assert_eq!(cfg.custom.js.as_deref(), Some("noop()"));
    }

    #[test]
    fn unknown_style_fields_are_ignored() {
        let cfg = parse(
            r#"
sections:
  - type: text
    content: t
    style:
      bold: true
      shadow: heavy
      align:
        horizontal: center
        diagonal: odd
"#,
        );
        let SectionSpec::Text(t) = &cfg.sections[0] else {
            panic!("expected text");
        };
        assert!(t.style.bold);
        assert_eq!(t.style.align.horizontal.as_deref(), Some("center"));
    }

    #[test]
    fn normalization_is_idempotent() {
        let cfg = parse(
            r##"
background:
  color: black
metadata:
  title: T
sections:
  - type: text
    content: hello
    color: "#abc"
    style:
      bold: true
  - type: gallery
    config:
      id: g
"##,
        );
        let canonical = serde_yaml::to_value(&cfg).unwrap();
        assert_eq!(normalize(&canonical), cfg);
    }
}
