#[cfg(test)]
mod tests {
    use serde_yaml::Value;

    use crate::*;

    fn resolve(yaml: &str) -> Vec<String> {
        let doc: Value = serde_yaml::from_str(yaml).unwrap();
        resolve_sources(doc.get("bits"), &SourceDefaults::default())
            .into_iter()
            .map(|s| s.base().to_string())
            .collect()
    }

    #[test]
    fn literal_and_url_entries_are_slash_terminated() {
        let chain = resolve(
            r#"
bits:
  sources:
    - https://cdn.example.com/bits
    - url: https://other.example.com/b/
"#,
        );
        assert_eq!(
            chain,
            vec![
                "https://cdn.example.com/bits/",
                "https://other.example.com/b/",
            ]
        );
    }

    #[test]
    fn github_entries_expand_to_raw_content_convention() {
        let chain = resolve(
            r#"
bits:
  sources:
    - github:
        repo: someone/widgets
    - github:
        repo: someone/widgets
        ref: v2
        path: extra/bits
"#,
        );
        assert_eq!(
            chain,
            vec![
                "https://raw.githubusercontent.com/someone/widgets/main/bits/",
                "https://raw.githubusercontent.com/someone/widgets/v2/extra/bits/",
            ]
        );
    }

    #[test]
    fn local_and_base_entries() {
        let chain = resolve(
            r#"
bits:
  sources:
    - local: ./my-bits
    - local: true
    - base: /shared/bits
"#,
        );
        assert_eq!(chain, vec!["./my-bits/", "./bits/", "/shared/bits/"]);
    }

    #[test]
    fn missing_declaration_falls_back_to_default_chain() {
        let chain = resolve("background:\n  color: white\n");
        assert_eq!(chain, vec![LOCAL_BIT_SOURCE, PUBLIC_BIT_SOURCE]);
    }

    #[test]
    fn unusable_entries_alone_fall_back_to_defaults() {
        let chain = resolve(
            r#"
bits:
  sources:
    - github:
        repo: "  "
    - 42
"#,
        );
        assert_eq!(chain, vec![LOCAL_BIT_SOURCE, PUBLIC_BIT_SOURCE]);
    }

    #[test]
    fn order_is_preserved() {
        let chain = resolve(
            r#"
bits:
  sources:
    - b/
    - a/
"#,
        );
        assert_eq!(chain, vec!["b/", "a/"]);
    }
}
