use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

#[rstest]
#[case("ARGS", "ARGS")]
#[case("@rx\\ foo", "@rx\\ foo")]
#[case("a\\\"b", "a\\\"b")]
#[case("\"\"", "")]
#[case("\"id:1,deny\"", "id:1,deny")]
#[case("\"say \\\"hi\\\"\"", "say \"hi\"")]
#[case("\"this option\\\n    is long\"", "this option     is long")]
#[case("\"crlf\\\r\nnext\"", "crlf next")]
#[case("\"keep \\\\ and \\d\"", "keep \\\\ and \\d")]
#[case("\"ends in \\\\\"", "ends in \\\\")]
fn option_content(#[case] lexeme: &str, #[case] expected: &str) {
    let option = DirectiveOption::new(lexeme, 10);
    assert_eq!(option.content(), expected);
}

#[test]
fn content_never_changes_offsets() {
    let option = DirectiveOption::new("\"a\\\"b\"", 8);
    assert_eq!(option.content(), "a\"b");
    assert_eq!(option.len(), 6);
    assert_eq!(option.end_offset(), 14);
    assert!(option.is_quoted());
}

#[rstest]
#[case("\"", false)]
#[case("a\"", false)]
#[case("\"a\"", true)]
#[case("\"\"", true)]
fn quoted_needs_a_quote_pair(#[case] lexeme: &str, #[case] quoted: bool) {
    assert_eq!(DirectiveOption::new(lexeme, 0).is_quoted(), quoted);
}

#[test]
fn sentinels_are_skipped_by_statements() {
    let root = ParseRoot {
        source_name: "rules.conf".to_string(),
        directives: vec![
            Directive::sentinel(DirectiveKind::Comment, 0, 5),
            Directive {
                keyword: DirectiveKind::SecMarker,
                offset: 6,
                options: vec![DirectiveOption::new("END", 16)],
                end: 19,
            },
            Directive::sentinel(DirectiveKind::Empty, 20, 20),
        ],
        warnings: vec![],
    };
    let statements = root.statements().collect::<Vec<_>>();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].keyword_str(), "SecMarker");
    assert_eq!(statements[0].end_offset(), 19);
    assert_eq!(root.directives[0].keyword_str(), "#");
}

mod proptests {
    use proptest::prelude::*;

    use super::*;
    use crate::rules::parser::from_str2;
    use crate::rules::parser::scanner::quoted_option;

    fn quoted_lexeme() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                "[a-z0-9 :@^,']{1,6}",
                Just(String::from("\\\"")),
                Just(String::from("\\\n    ")),
                Just(String::from("\\\r\n")),
            ],
            0..8,
        )
        .prop_map(|pieces| format!("\"{}\"", pieces.concat()))
    }

    proptest! {
        #[test]
        fn content_escapes_back_to_the_joined_lexeme(lexeme in quoted_lexeme()) {
            let content = DirectiveOption::new(lexeme.as_str(), 0).content();
            let escaped = format!("\"{}\"", content.replace('"', "\\\""));
            let joined = lexeme.replace("\\\r\n", " ").replace("\\\n", " ");
            prop_assert_eq!(&escaped, &joined);

            let (rest, scanned) = quoted_option(from_str2(&escaped))
                .map_err(|err| TestCaseError::fail(format!("{:?}", err)))?;
            prop_assert!(rest.fragment().is_empty());
            prop_assert_eq!(*scanned.fragment(), escaped.as_str());
        }
    }
}
