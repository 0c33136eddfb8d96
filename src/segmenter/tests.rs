use super::*;

const SAMPLES: [&str; 10] = [
    "",
    "   \n\t  ",
    "plain words without any structure",
    "# Title\n\nSome body text.\n\n## Next\n- a\n- b\n\n```\ncode\n```\n",
    "function go() {\n  if (x) {\n    run();\n  }\n}\n\nasync function later() {}\n",
    "<section><p>One.</p>\n<pre>two</pre></section>\ntrailing",
    "Alice: hi.\nstill Alice\nBob: hello! How are you?\n",
    "\\section{Intro}\nText here.\n\\begin{align}a\\end{align}\n$$x$$ end",
    "2024-01-01 00:00:00 start\n[INFO] ok\n  detail\nKeyError: k\n",
    "From: x@y.z\nTo: y@z.x\n\nHello there.\n\n> earlier text\n> more\n\nThanks.",
];

fn joined(blocks: &[Block<'_>]) -> String {
    blocks.iter().map(|b| b.text).collect()
}

#[test]
fn test_every_strategy_reconstructs_its_input() {
    for text in SAMPLES {
        for strategy in Strategy::ALL {
            let blocks = strategy.segment(text);
            assert_eq!(joined(&blocks), text, "{strategy} on {text:?}");

            let mut expected_offset = 0;
            for block in &blocks {
                assert_eq!(block.offset, expected_offset, "{strategy} on {text:?}");
                expected_offset = block.end();
            }
        }
    }
}

#[test]
fn test_empty_text_yields_no_blocks() {
    for strategy in Strategy::ALL {
        assert!(strategy.segment("").is_empty(), "{strategy}");
    }
}

#[test]
fn test_unstructured_text_is_one_block() {
    let text = "no delimiters here";
    for strategy in [Strategy::Markdown, Strategy::Html, Strategy::Latex, Strategy::Code] {
        assert_eq!(strategy.segment(text), vec![Block::new(text, 0)], "{strategy}");
    }
}

#[test]
fn test_fixed_alternates_words_and_whitespace() {
    let blocks: Vec<&str> = Strategy::Fixed
        .segment("a  b\n\tc")
        .into_iter()
        .map(|b| b.text)
        .collect();
    assert_eq!(blocks, vec!["a", "  ", "b", "\n\t", "c"]);
}

#[test]
fn test_sentences_keep_trailing_whitespace() {
    let blocks: Vec<&str> = Strategy::Sentence
        .segment("One. Two!  Three?\nfour")
        .into_iter()
        .map(|b| b.text)
        .collect();
    assert_eq!(blocks, vec!["One. ", "Two!  ", "Three?\n", "four"]);
}

#[test]
fn test_paragraphs_split_on_blank_lines_and_indentation() {
    let text = "First line\nsame para\n\n\nSecond\n    indented block\nThird";
    let blocks: Vec<&str> = Strategy::Paragraph
        .segment(text)
        .into_iter()
        .map(|b| b.text)
        .collect();
    assert_eq!(
        blocks,
        vec![
            "First line\nsame para\n\n\n",
            "Second\n",
            "    indented block\nThird"
        ]
    );
}

#[test]
fn test_plain_segments_like_paragraph() {
    let text = "One.\n\nTwo.";
    assert_eq!(Strategy::Plain.segment(text), Strategy::Paragraph.segment(text));
}

#[test]
fn test_lines_keep_line_breaks() {
    let blocks: Vec<&str> = Strategy::Line
        .segment("a\r\nb\nc")
        .into_iter()
        .map(|b| b.text)
        .collect();
    assert_eq!(blocks, vec!["a\r\n", "b\n", "c"]);
}

#[test]
fn test_fallback_chains() {
    let chain = |s: Strategy| s.chain().map(Strategy::name).collect::<Vec<_>>();

    assert_eq!(chain(Strategy::Markdown), ["markdown", "paragraph", "sentence", "fixed"]);
    assert_eq!(chain(Strategy::Code), ["code", "line", "fixed"]);
    assert_eq!(chain(Strategy::Logs), ["logs", "line", "fixed"]);
    assert_eq!(chain(Strategy::Dialogue), ["dialogue", "sentence", "fixed"]);
    assert_eq!(chain(Strategy::Plain), ["plain", "sentence", "fixed"]);
    assert_eq!(chain(Strategy::Fixed), ["fixed"]);

    for strategy in Strategy::ALL {
        assert_eq!(strategy.chain().last(), Some(Strategy::Fixed));
    }
}

#[test]
fn test_names_round_trip() {
    assert_eq!(Strategy::ALL.map(Strategy::name), STRATEGY_NAMES);
    for name in STRATEGY_NAMES {
        let strategy: Strategy = name.parse().unwrap();
        assert_eq!(strategy.to_string(), name);
    }
}

#[test]
fn test_unknown_strategy_name() {
    let err = "poetry".parse::<Strategy>().unwrap_err();
    assert_eq!(err, ChunkError::UnknownStrategy("poetry".to_string()));
    assert!(err.to_string().contains("fixed, sentence, paragraph"));
}

#[test]
fn test_selection_parsing() {
    assert_eq!("adaptive".parse::<Selection>().unwrap(), Selection::Adaptive);
    assert_eq!(
        "logs".parse::<Selection>().unwrap(),
        Selection::Strategy(Strategy::Logs)
    );
    assert!("Markdown".parse::<Selection>().is_err());
    assert_eq!(Selection::default(), Selection::Adaptive);
}

#[test]
fn test_selection_resolves() {
    assert_eq!(Selection::Adaptive.resolve("# Heading"), Strategy::Markdown);
    assert_eq!(
        Selection::Strategy(Strategy::Fixed).resolve("# Heading"),
        Strategy::Fixed
    );
}

#[test]
fn test_assembled_pattern_is_compiled_once() {
    static CELL: OnceLock<Regex> = OnceLock::new();
    let first = cached_regex_with(&CELL, || format!("(?i){}", "tag"));
    let second = cached_regex_with(&CELL, || unreachable!("already compiled"));

    assert!(std::ptr::eq(first, second));
    assert!(first.is_match("TAG"));
}
