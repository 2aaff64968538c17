//! Go struct extraction.
//!
//! Source text is parsed with tree-sitter's Go grammar; the resulting tree is
//! walked for `type` declarations whose underlying type is a struct. Every
//! other declaration shape (aliases, interfaces, named scalars) is skipped.
use crate::errors::ParseError;
use crate::graph::{FieldInfo, StructInfo};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tree_sitter::{Node, Parser, Point};

mod literal;

pub use literal::strip_tag_literal;

pub struct GoParser {
    parser: Parser,
}

impl std::fmt::Debug for GoParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoParser").finish_non_exhaustive()
    }
}

impl GoParser {
    /// Create a parser loaded with the Go grammar.
    ///
    /// # Errors
    /// Returns `ParseError::Language` if the grammar is incompatible with the tree-sitter runtime.
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| ParseError::Language(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Read `path` and extract its structs.
    ///
    /// # Errors
    /// Returns `ParseError::Io` when the file cannot be read, `ParseError::InvalidUtf8` when it is
    /// not UTF-8, and the errors of [`GoParser::extract`] otherwise.
    pub fn parse_file(&mut self, path: &Path) -> Result<Vec<StructInfo>, ParseError> {
        let bytes = std::fs::read(path)?;
        let source = String::from_utf8(bytes)
            .map_err(|_| ParseError::InvalidUtf8 { file: path.to_path_buf() })?;
        self.extract(&source)
    }

    /// Extract every struct type declared in `source`, in source order.
    ///
    /// # Errors
    /// Returns `ParseError::Syntax` with the first error location when the source does not parse
    /// cleanly, or `ParseError::NoTree` if tree-sitter gives up.
    pub fn extract(&mut self, source: &str) -> Result<Vec<StructInfo>, ParseError> {
        let tree = self.parser.parse(source, None).ok_or(ParseError::NoTree)?;
        let root = tree.root_node();
        if root.has_error() {
            let at = first_error(root).unwrap_or_else(|| root.start_position());
            return Err(ParseError::Syntax { line: at.row + 1, column: at.column + 1 });
        }

        let src = source.as_bytes();
        let mut out = Vec::new();
        // Pre-order walk so nested declarations come out in source order
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.kind() == "type_declaration" {
                let mut cursor = node.walk();
                for spec in node.named_children(&mut cursor) {
                    if spec.kind() != "type_spec" {
                        continue;
                    }
                    if let Some(info) = struct_from_spec(spec, src) {
                        out.push(info);
                    }
                }
            }
            let mut cursor = node.walk();
            let children: Vec<Node> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
        Ok(out)
    }
}

fn struct_from_spec(spec: Node, src: &[u8]) -> Option<StructInfo> {
    let name = text(spec.child_by_field_name("name")?, src);
    let ty = spec.child_by_field_name("type")?;
    if ty.kind() != "struct_type" {
        return None;
    }
    let mut cursor = ty.walk();
    let list = ty.named_children(&mut cursor).find(|n| n.kind() == "field_declaration_list");
    let fields = list.map(|l| fields_from_list(l, src)).unwrap_or_default();
    Some(StructInfo::new(name, fields))
}

fn fields_from_list(list: Node, src: &[u8]) -> Vec<FieldInfo> {
    let mut cursor = list.walk();
    let members: Vec<Node> = list.named_children(&mut cursor).collect();
    let mut out = Vec::new();
    for (idx, member) in members.iter().enumerate() {
        if member.kind() != "field_declaration" {
            continue;
        }
        let Some(field) = field_from_decl(*member, src) else { continue };
        let comment = line_comment(&members[idx + 1..], member.end_position().row, src);
        out.push(field.with_comment(&comment));
    }
    out
}

fn field_from_decl(decl: Node, src: &[u8]) -> Option<FieldInfo> {
    let ty = decl.child_by_field_name("type")?;
    let name = decl.child_by_field_name("name").map(|n| text(n, src)).unwrap_or("");
    // Embedded fields keep the optional leading `*`, which sits outside the type node
    let type_start = if name.is_empty() { decl.start_byte() } else { ty.start_byte() };
    let type_text = std::str::from_utf8(&src[type_start..ty.end_byte()]).unwrap_or("");
    let mut field = FieldInfo::new(name, type_text);
    if let Some(tag) = decl.child_by_field_name("tag") {
        field = field.with_tag(&strip_tag_literal(text(tag, src)));
    }
    Some(field)
}

/// Comments that start on the line a field ends on, concatenated in source order.
///
/// They only count when nothing else follows on that line.
fn line_comment(following: &[Node], row: usize, src: &[u8]) -> String {
    let mut comment = String::new();
    for node in following {
        if node.start_position().row != row {
            break;
        }
        if node.kind() != "comment" {
            return String::new();
        }
        comment.push_str(&text(*node, src).replace('\r', ""));
    }
    comment
}

fn first_error(root: Node) -> Option<Point> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node.start_position());
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

fn text<'a>(node: Node, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

/// Result of extracting a batch of files.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// Structs from every file that parsed, in input order.
    pub structs: Vec<StructInfo>,
    /// Files that contributed nothing because they could not be read or parsed.
    pub failures: Vec<(PathBuf, ParseError)>,
    pub files: usize,
}

impl ExtractionReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Parse `paths` in parallel and collect their structs in input order.
///
/// A file that fails contributes zero structs; the failure is logged and kept in
/// `ExtractionReport::failures`.
#[must_use]
pub fn extract_files<P: AsRef<Path> + Sync>(paths: &[P]) -> ExtractionReport {
    let outcomes: Vec<(PathBuf, Result<Vec<StructInfo>, ParseError>)> = paths
        .par_iter()
        .map_init(
            || GoParser::new().map_err(|e| e.to_string()),
            |parser, path| {
                let path = path.as_ref().to_path_buf();
                let res = match parser {
                    Ok(parser) => parser.parse_file(&path),
                    Err(msg) => Err(ParseError::Language(msg.clone())),
                };
                (path, res)
            },
        )
        .collect();

    let mut report = ExtractionReport { files: outcomes.len(), ..ExtractionReport::default() };
    for (path, res) in outcomes {
        match res {
            Ok(structs) => {
                debug!(file = %path.display(), structs = structs.len(), "extracted structs");
                report.structs.extend(structs);
            }
            Err(err) => {
                warn!(file = %path.display(), error = %err, "skipping file");
                report.failures.push((path, err));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(src: &str) -> Vec<StructInfo> {
        GoParser::new().expect("grammar").extract(src).expect("parse")
    }

    #[test]
    fn test_extracts_named_fields_in_order() {
        let src = r"
package p

type A struct {
	B B
	C *C
	Items []*Item
	Index map[string]int
}
";
        let structs = extract(src);
        assert_eq!(structs.len(), 1);
        let a = &structs[0];
        assert_eq!(a.name, "A");
        let got: Vec<(&str, &str)> =
            a.fields.iter().map(|f| (f.name.as_str(), f.type_text.as_str())).collect();
        assert_eq!(
            got,
            vec![("B", "B"), ("C", "*C"), ("Items", "[]*Item"), ("Index", "map[string]int")]
        );
        assert_eq!(a.fields[2].referenced_type_name(), "Item");
    }

    #[test]
    fn test_embedded_fields_use_type_as_name() {
        let src = r"
package p

type Wrapper struct {
	sync.Mutex
	*Base
	Named int
}
";
        let structs = extract(src);
        let names: Vec<&str> = structs[0].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["sync.Mutex", "*Base", "Named"]);
        assert_eq!(structs[0].fields[1].type_text, "*Base");
        assert_eq!(structs[0].fields[1].referenced_type_name(), "Base");
    }

    #[test]
    fn test_tags_and_line_comments() {
        let src = r#"
package p

type User struct {
	// leading comments are not attached
	ID   int    `json:"id" db:"id"` // primary key
	Name string "json:\"n\""
	Note string // first /* second */
	Bare bool
}
"#;
        let structs = extract(src);
        let f = &structs[0].fields;
        assert_eq!(f[0].tag, r#"json:"id" db:"id""#);
        assert_eq!(f[0].comment, "// primary key");
        assert_eq!(f[1].tag, r#"json:"n""#);
        assert_eq!(f[1].comment, "");
        assert_eq!(f[2].comment, "// first /* second */");
        assert_eq!(f[3].tag, "");
        assert_eq!(f[3].comment, "");
    }

    #[test]
    fn test_multiple_names_use_first_identifier() {
        let structs = extract("package p\ntype P struct { X, Y float64 }\n");
        assert_eq!(structs[0].fields.len(), 1);
        assert_eq!(structs[0].fields[0].name, "X");
        assert_eq!(structs[0].fields[0].type_text, "float64");
    }

    #[test]
    fn test_skips_non_struct_declarations() {
        let src = r"
package p

type ID int
type Alias = Other
type Reader interface { Read() }
type (
	Empty struct{}
	Fn func() error
)
";
        let structs = extract(src);
        let names: Vec<&str> = structs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Empty"]);
        assert!(structs[0].fields.is_empty());
    }

    #[test]
    fn test_nested_declarations_are_visited() {
        let src = r"
package p

type Outer struct { In Inner }

func f() {
	type local struct { v int }
	_ = local{}
}
";
        let structs = extract(src);
        let names: Vec<&str> = structs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Outer", "local"]);
    }

    #[test]
    fn test_anonymous_struct_field_kept_as_text() {
        let src = "package p\ntype A struct {\n\tOpts struct {\n\t\tDebug bool\n\t} // options\n}\n";
        let structs = extract(src);
        assert_eq!(structs.len(), 1);
        let opts = &structs[0].fields[0];
        assert!(opts.type_text.starts_with("struct {"));
        assert_eq!(opts.comment, "// options");
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let err = GoParser::new().unwrap().extract("package p\ntype A struct {\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn test_crlf_line_endings_do_not_leak_into_comments() {
        let src = "package p\r\n\r\ntype A struct {\r\n\tX int // c\r\n\tY B /* d\r\n e */\r\n\tZ C\r\n}\r\n";
        let structs = extract(src);
        let comments: Vec<&str> = structs[0].fields.iter().map(|f| f.comment.as_str()).collect();
        assert_eq!(comments, vec!["// c", "/* d\n e */", ""]);
    }

    #[test]
    fn test_extract_files_reports_failures_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.go");
        let bad = dir.path().join("bad.go");
        let b = dir.path().join("b.go");
        std::fs::write(&a, "package p\ntype S struct { A int }\n").unwrap();
        std::fs::write(&bad, "package p\ntype {{{\n").unwrap();
        std::fs::write(&b, "package p\ntype S struct { B int }\ntype T struct{ X S }\n").unwrap();
        let missing = dir.path().join("missing.go");

        let report = extract_files(&[a, bad.clone(), b, missing.clone()]);
        assert!(!report.is_clean());
        assert_eq!(report.files, 4);
        let names: Vec<&str> = report.structs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["S", "S", "T"]);
        assert_eq!(report.structs[1].fields[0].name, "B");
        let failed: Vec<&PathBuf> = report.failures.iter().map(|(p, _)| p).collect();
        assert_eq!(failed, vec![&bad, &missing]);
        assert!(matches!(report.failures[1].1, ParseError::Io(_)));
    }
}
