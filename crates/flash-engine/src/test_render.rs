#[cfg(test)]
mod tests {
    use flash_surface::{MOUNT_TAG, Node, TextAlign};

    use crate::{
        bootstrap_document,
        render::is_document_path,
        test_support::{ScriptedFetcher, scripted_runtime},
    };

    const LOCATION: &str = "https://site.test/";

    #[test]
    fn document_paths_match_either_extension_case_insensitively() {
        assert!(is_document_path("about.yaml"));
        assert!(is_document_path("about.YML"));
        assert!(is_document_path("about.yaml?v=2"));
        assert!(is_document_path("about.yml#top"));
        assert!(!is_document_path("about.html"));
        assert!(!is_document_path("about"));
        assert!(!is_document_path("yaml.html"));
    }

    #[test]
    fn bootstrap_wraps_target_in_a_mount_and_bundle_reference() {
        let doc = bootstrap_document("about.yaml");
        assert!(doc.contains(&format!("<{MOUNT_TAG} src=\"about.yaml\">")));
        assert!(doc.contains("flash.js"));
    }

    #[tokio::test]
    async fn frame_with_document_target_carries_bootstrap() {
        let fetcher = ScriptedFetcher::new();
        let (rt, _events) = scripted_runtime(fetcher, LOCATION);

        let id = rt
            .surface()
            .add_inline_mount("sections:\n  - frame:\n      src: about.yaml\n");
        rt.process_mount(id).await;

        let nodes = rt.surface().mount_nodes(id);
        let Node::Frame(f) = &nodes[0] else {
            panic!("expected frame");
        };
        assert_eq!(f.target, "about.yaml");
        let bootstrap = f.bootstrap.as_deref().expect("bootstrap document");
        assert!(bootstrap.contains("about.yaml"));
    }

    #[tokio::test]
    async fn frame_with_plain_target_embeds_directly() {
        let fetcher = ScriptedFetcher::new();
        let (rt, _events) = scripted_runtime(fetcher.clone(), LOCATION);

        let id = rt
            .surface()
            .add_inline_mount("sections:\n  - frame:\n      url: https://example.test/page\n");
        rt.process_mount(id).await;

        let nodes = rt.surface().mount_nodes(id);
        let Node::Frame(f) = &nodes[0] else {
            panic!("expected frame");
        };
        assert_eq!(f.target, "https://example.test/page");
        assert!(f.bootstrap.is_none());
        // The reserved bit never touches the source chain.
        assert!(fetcher.hits().is_empty());
    }

    #[tokio::test]
    async fn text_sections_map_color_and_alignment() {
        let fetcher = ScriptedFetcher::new();
        let (rt, _events) = scripted_runtime(fetcher, LOCATION);

        let id = rt.surface().add_inline_mount(
            "sections:\n  - text:\n      content: Hello\n      color: '#abc'\n      id: headline\n      style:\n        bold: true\n        align:\n          horizontal: center\n          vertical: middle\n",
        );
        rt.process_mount(id).await;

        let nodes = rt.surface().mount_nodes(id);
        let Node::Text(t) = &nodes[0] else {
            panic!("expected text");
        };
        assert_eq!(t.content, "Hello");
        assert_eq!(t.color.as_deref(), Some("#AABBCC"));
        assert!(t.bold);
        assert_eq!(t.text_align, Some(TextAlign::Center));
        assert!(t.viewport_center);
        assert_eq!(t.id.as_deref(), Some("headline"));
    }

    #[tokio::test]
    async fn mixed_sections_interleave_text_and_containers_in_order() {
        let fetcher = ScriptedFetcher::new();
        fetcher.insert("https://site.test/bits/card.yaml", "css: '.card {}'");
        let (rt, _events) = scripted_runtime(fetcher, LOCATION);

        let id = rt.surface().add_inline_mount(
            "sections:\n  - text: above\n  - card:\n      id: c1\n  - text: below\n",
        );
        rt.process_mount(id).await;

        let nodes = rt.surface().mount_nodes(id);
        assert_eq!(nodes.len(), 3);
        assert!(matches!(&nodes[0], Node::Text(t) if t.content == "above"));
        assert!(matches!(&nodes[1], Node::Container(c) if c.bit == "card" && c.id.as_deref() == Some("c1")));
        assert!(matches!(&nodes[2], Node::Text(t) if t.content == "below"));
    }
}
