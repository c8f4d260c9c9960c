//! Structured query-mapping descriptor.
//!
//! A [`QueryMapping`] is the MyBatis mapper document as data: a result map,
//! reusable SQL fragments, and statements built from [`Fragment`]s. It has two
//! interpretations:
//!
//! - [`QueryMapping::to_xml`] renders the mapper XML file;
//! - [`QueryMapping::bind`] evaluates a statement against the set of members
//!   that are present (non-null) and yields the SQL MyBatis would execute.
//!
//! Bound SQL is whitespace-normalized and uses `?` placeholders; `params`
//! lists the bound members in placeholder order.

use super::code_builder::CodeBuilder;

/// Piece of a statement body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Literal SQL text.
    Text(String),
    /// Bound parameter, `#{name}`.
    Param(String),
    /// Reference to a [`SqlFragment`] by id.
    Include(String),
    /// Line break in the XML rendering; a space in bound SQL.
    Break,
    /// Emitted only when `member` is present. Body pieces are concatenated
    /// without separators.
    IfPresent { member: String, body: Vec<Fragment> },
    /// MyBatis `<trim>`: wraps a non-empty body in `prefix`/`suffix` after
    /// stripping a trailing `suffix_overrides`.
    Trim {
        prefix: String,
        suffix: String,
        suffix_overrides: String,
        body: Vec<Fragment>,
    },
    /// MyBatis `<set>`: `SET` followed by the body with its trailing comma
    /// removed; nothing when the body is empty.
    Set(Vec<Fragment>),
}

impl Fragment {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn param(name: impl Into<String>) -> Self {
        Self::Param(name.into())
    }

    pub fn if_present(member: impl Into<String>, body: Vec<Fragment>) -> Self {
        Self::IfPresent {
            member: member.into(),
            body,
        }
    }

    pub fn trim(prefix: &str, suffix: &str, suffix_overrides: &str, body: Vec<Fragment>) -> Self {
        Self::Trim {
            prefix: prefix.into(),
            suffix: suffix.into(),
            suffix_overrides: suffix_overrides.into(),
            body,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Insert,
    Update,
    Delete,
    Select,
}

impl StatementKind {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Select => "select",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub id: String,
    pub kind: StatementKind,
    pub parameter_type: Option<String>,
    pub result_map: Option<String>,
    /// Property receiving a database-generated key (`useGeneratedKeys`).
    pub generated_key: Option<String>,
    pub body: Vec<Fragment>,
}

impl Statement {
    pub fn new(id: impl Into<String>, kind: StatementKind, body: Vec<Fragment>) -> Self {
        Self {
            id: id.into(),
            kind,
            parameter_type: None,
            result_map: None,
            generated_key: None,
            body,
        }
    }

    pub fn parameter_type(mut self, ty: impl Into<String>) -> Self {
        self.parameter_type = Some(ty.into());
        self
    }

    pub fn result_map(mut self, id: impl Into<String>) -> Self {
        self.result_map = Some(id.into());
        self
    }

    pub fn generated_key(mut self, property: impl Into<String>) -> Self {
        self.generated_key = Some(property.into());
        self
    }

    /// Members referenced by `IfPresent` guards, in body order.
    pub fn guarded_members(&self) -> Vec<&str> {
        fn walk<'a>(frags: &'a [Fragment], out: &mut Vec<&'a str>) {
            for f in frags {
                match f {
                    Fragment::IfPresent { member, body } => {
                        if !out.contains(&member.as_str()) {
                            out.push(member.as_str());
                        }
                        walk(body, out);
                    }
                    Fragment::Trim { body, .. } | Fragment::Set(body) => walk(body, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.body, &mut out);
        out
    }
}

/// One `<id>`/`<result>` line of a result map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub column: String,
    pub property: String,
    pub identity: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMap {
    pub id: String,
    pub type_name: String,
    pub entries: Vec<ResultEntry>,
}

/// Reusable `<sql>` fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFragment {
    pub id: String,
    pub text: String,
}

/// A statement evaluated for concrete inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundSql {
    pub sql: String,
    pub params: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMapping {
    pub namespace: String,
    pub result_map: ResultMap,
    pub fragments: Vec<SqlFragment>,
    pub statements: Vec<Statement>,
}

impl QueryMapping {
    pub fn statement(&self, id: &str) -> Option<&Statement> {
        self.statements.iter().find(|s| s.id == id)
    }

    pub fn fragment(&self, id: &str) -> Option<&SqlFragment> {
        self.fragments.iter().find(|f| f.id == id)
    }

    /// Evaluate statement `id` with `present` deciding which guarded members
    /// are non-null. `None` if no such statement exists.
    pub fn bind(&self, id: &str, present: impl Fn(&str) -> bool) -> Option<BoundSql> {
        let statement = self.statement(id)?;
        let mut binder = Binder {
            mapping: self,
            present: &present,
            params: Vec::new(),
        };
        let raw = binder.sequence(&statement.body, " ");
        Some(BoundSql {
            sql: raw.split_whitespace().collect::<Vec<_>>().join(" "),
            params: binder.params,
        })
    }

    /// Bind with every member in `members` present and all others absent.
    pub fn bind_with(&self, id: &str, members: &[&str]) -> Option<BoundSql> {
        self.bind(id, |m| members.contains(&m))
    }

    pub fn to_xml(&self) -> String {
        let mut b = CodeBuilder::xml();
        b.line(r#"<?xml version="1.0" encoding="UTF-8"?>"#)
            .line(r#"<!DOCTYPE mapper PUBLIC "-//mybatis.org//DTD Mapper 3.0//EN" "http://mybatis.org/dtd/mybatis-3-mapper.dtd">"#)
            .line(format!(r#"<mapper namespace="{}">"#, escape_attr(&self.namespace)));
        b.indent().blank();

        let rm = &self.result_map;
        b.block(
            format!(
                r#"<resultMap id="{}" type="{}">"#,
                escape_attr(&rm.id),
                escape_attr(&rm.type_name)
            ),
            "</resultMap>",
            |b| {
                b.each(&rm.entries, |b, entry| {
                    let tag = if entry.identity { "id" } else { "result" };
                    b.line(format!(
                        r#"<{tag} column="{}" property="{}" />"#,
                        escape_attr(&entry.column),
                        escape_attr(&entry.property)
                    ));
                });
            },
        );

        for fragment in &self.fragments {
            b.blank().block(
                format!(r#"<sql id="{}">"#, escape_attr(&fragment.id)),
                "</sql>",
                |b| {
                    b.line(escape_text(&fragment.text));
                },
            );
        }

        for statement in &self.statements {
            let mut open = format!(r#"<{} id="{}""#, statement.kind.tag(), escape_attr(&statement.id));
            if let Some(ty) = &statement.parameter_type {
                open.push_str(&format!(r#" parameterType="{}""#, escape_attr(ty)));
            }
            if let Some(rm) = &statement.result_map {
                open.push_str(&format!(r#" resultMap="{}""#, escape_attr(rm)));
            }
            if let Some(key) = &statement.generated_key {
                open.push_str(&format!(
                    r#" useGeneratedKeys="true" keyProperty="{}""#,
                    escape_attr(key)
                ));
            }
            open.push('>');

            b.blank()
                .block(open, format!("</{}>", statement.kind.tag()), |b| {
                    write_xml_body(b, &statement.body);
                });
        }

        b.blank().dedent().line("</mapper>");
        b.build()
    }
}

struct Binder<'a> {
    mapping: &'a QueryMapping,
    present: &'a dyn Fn(&str) -> bool,
    params: Vec<String>,
}

impl Binder<'_> {
    fn sequence(&mut self, frags: &[Fragment], sep: &str) -> String {
        let mut parts = Vec::with_capacity(frags.len());
        for f in frags {
            let rendered = self.fragment(f);
            if !rendered.trim().is_empty() {
                parts.push(rendered);
            }
        }
        if sep.is_empty() {
            parts.concat()
        } else {
            join_spaced(&parts)
        }
    }

    fn fragment(&mut self, fragment: &Fragment) -> String {
        match fragment {
            Fragment::Text(text) => text.clone(),
            Fragment::Param(name) => {
                self.params.push(name.clone());
                "?".into()
            }
            Fragment::Include(id) => self
                .mapping
                .fragment(id)
                .map(|f| f.text.clone())
                .unwrap_or_default(),
            Fragment::Break => String::new(),
            Fragment::IfPresent { member, body } => {
                if (self.present)(member.as_str()) {
                    self.sequence(body, "")
                } else {
                    String::new()
                }
            }
            Fragment::Trim {
                prefix,
                suffix,
                suffix_overrides,
                body,
            } => {
                let inner = self.sequence(body, " ");
                wrap_trimmed(&inner, prefix, suffix, suffix_overrides)
            }
            Fragment::Set(body) => {
                let inner = self.sequence(body, " ");
                wrap_trimmed(&inner, "SET ", "", ",")
            }
        }
    }
}

/// Space-join, except that a piece starting with `,` attaches to its
/// predecessor.
fn join_spaced(parts: &[String]) -> String {
    let mut out = String::new();
    for part in parts {
        if !out.is_empty() && !part.starts_with(',') {
            out.push(' ');
        }
        out.push_str(part);
    }
    out
}

fn wrap_trimmed(inner: &str, prefix: &str, suffix: &str, overrides: &str) -> String {
    let inner = inner.trim();
    let inner = if overrides.is_empty() {
        inner
    } else {
        inner.strip_suffix(overrides).unwrap_or(inner).trim_end()
    };
    if inner.is_empty() {
        String::new()
    } else {
        format!("{prefix}{inner}{suffix}")
    }
}

/// XML layout: inline fragments share a line, blocks get their own lines.
fn write_xml_body(b: &mut CodeBuilder, frags: &[Fragment]) {
    let mut line: Vec<String> = Vec::new();
    let flush = |b: &mut CodeBuilder, line: &mut Vec<String>| {
        if !line.is_empty() {
            b.line(join_spaced(line));
            line.clear();
        }
    };

    for f in frags {
        match f {
            Fragment::Text(_) | Fragment::Param(_) | Fragment::Include(_) => {
                line.push(inline_xml(f));
            }
            Fragment::Break => flush(b, &mut line),
            Fragment::IfPresent { .. } => {
                flush(b, &mut line);
                b.line(inline_xml(f));
            }
            Fragment::Trim {
                prefix,
                suffix,
                suffix_overrides,
                body,
            } => {
                flush(b, &mut line);
                b.block(
                    format!(
                        r#"<trim prefix="{}" suffix="{}" suffixOverrides="{}">"#,
                        escape_attr(prefix),
                        escape_attr(suffix),
                        escape_attr(suffix_overrides)
                    ),
                    "</trim>",
                    |b| write_xml_body(b, body),
                );
            }
            Fragment::Set(body) => {
                flush(b, &mut line);
                b.block("<set>", "</set>", |b| write_xml_body(b, body));
            }
        }
    }
    flush(b, &mut line);
}

fn inline_xml(fragment: &Fragment) -> String {
    match fragment {
        Fragment::Text(text) => escape_text(text),
        Fragment::Param(name) => format!("#{{{name}}}"),
        Fragment::Include(id) => format!(r#"<include refid="{}" />"#, escape_attr(id)),
        Fragment::Break => String::new(),
        Fragment::IfPresent { member, body } => format!(
            r#"<if test="{} != null">{}</if>"#,
            escape_attr(member),
            body.iter().map(inline_xml).collect::<String>()
        ),
        Fragment::Trim { body, .. } | Fragment::Set(body) => {
            join_spaced(&body.iter().map(inline_xml).collect::<Vec<_>>())
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> QueryMapping {
        QueryMapping {
            namespace: "demo.Mapper".into(),
            result_map: ResultMap {
                id: "BaseResultMap".into(),
                type_name: "demo.Item".into(),
                entries: vec![
                    ResultEntry {
                        column: "id".into(),
                        property: "id".into(),
                        identity: true,
                    },
                    ResultEntry {
                        column: "title".into(),
                        property: "title".into(),
                        identity: false,
                    },
                ],
            },
            fragments: vec![SqlFragment {
                id: "cols".into(),
                text: "id, title".into(),
            }],
            statements: vec![
                Statement::new(
                    "find",
                    StatementKind::Select,
                    vec![
                        Fragment::text("SELECT"),
                        Fragment::Include("cols".into()),
                        Fragment::Break,
                        Fragment::text("FROM item WHERE id ="),
                        Fragment::param("id"),
                    ],
                )
                .result_map("BaseResultMap"),
                Statement::new(
                    "touch",
                    StatementKind::Update,
                    vec![
                        Fragment::text("UPDATE item"),
                        Fragment::Set(vec![Fragment::if_present(
                            "title",
                            vec![
                                Fragment::text("title = "),
                                Fragment::param("title"),
                                Fragment::text(","),
                            ],
                        )]),
                        Fragment::text("WHERE id ="),
                        Fragment::param("id"),
                    ],
                ),
            ],
        }
    }

    #[test]
    fn bind_expands_includes_and_placeholders() {
        let bound = mapping().bind_with("find", &[]).unwrap();
        assert_eq!(bound.sql, "SELECT id, title FROM item WHERE id = ?");
        assert_eq!(bound.params, vec!["id"]);
    }

    #[test]
    fn empty_set_is_dropped() {
        let bound = mapping().bind_with("touch", &[]).unwrap();
        assert_eq!(bound.sql, "UPDATE item WHERE id = ?");
        let bound = mapping().bind_with("touch", &["title"]).unwrap();
        assert_eq!(bound.sql, "UPDATE item SET title = ? WHERE id = ?");
        assert_eq!(bound.params, vec!["title", "id"]);
    }

    #[test]
    fn comma_pieces_attach_to_predecessor() {
        let parts = ["LIMIT".to_string(), "?".into(), ",".into(), "?".into()];
        assert_eq!(join_spaced(&parts), "LIMIT ?, ?");
    }

    #[test]
    fn unknown_statement() {
        assert!(mapping().bind_with("nope", &[]).is_none());
    }

    #[test]
    fn trim_strips_trailing_override() {
        assert_eq!(wrap_trimmed("a, b,", "(", ")", ","), "(a, b)");
        assert_eq!(wrap_trimmed("   ", "(", ")", ","), "");
    }

    #[test]
    fn xml_layout() {
        let xml = mapping().to_xml();
        assert!(xml.contains(r#"<mapper namespace="demo.Mapper">"#));
        assert!(xml.contains(r#"        <id column="id" property="id" />"#));
        assert!(xml.contains(r#"        <result column="title" property="title" />"#));
        assert!(xml.contains(
            "    <select id=\"find\" resultMap=\"BaseResultMap\">\n        SELECT <include refid=\"cols\" />\n        FROM item WHERE id = #{id}\n    </select>"
        ));
        assert!(xml.contains(
            "        <set>\n            <if test=\"title != null\">title = #{title},</if>\n        </set>"
        ));
        assert!(xml.ends_with("</mapper>\n"));
    }

    #[test]
    fn guarded_members_in_order() {
        let m = mapping();
        assert_eq!(m.statement("touch").unwrap().guarded_members(), vec!["title"]);
    }
}
