//! Indentation-aware text builder used by every renderer.

/// Indentation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(&'static str);

impl Indent {
    pub const JAVA: Self = Self("    ");
    pub const XML: Self = Self("    ");
    pub const YAML: Self = Self("  ");
}

/// Fluent builder for line-oriented source text.
///
/// ```
/// use tablesmith_core::codegen::CodeBuilder;
///
/// let mut b = CodeBuilder::java();
/// b.block("public class A {", "}", |b| {
///     b.line("private Long id;");
/// });
/// assert_eq!(b.build(), "public class A {\n    private Long id;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    pub fn java() -> Self {
        Self::new(Indent::JAVA)
    }

    pub fn xml() -> Self {
        Self::new(Indent::XML)
    }

    pub fn yaml() -> Self {
        Self::new(Indent::YAML)
    }

    /// Add a line with the current indentation.
    pub fn line(&mut self, s: impl AsRef<str>) -> &mut Self {
        let s = s.as_ref();
        if s.is_empty() {
            return self.blank();
        }
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.0);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// `open`, an indented body, then `close`.
    pub fn block(
        &mut self,
        open: impl AsRef<str>,
        close: impl AsRef<str>,
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.line(open);
        self.indent();
        body(self);
        self.dedent();
        self.line(close)
    }

    /// `header` followed by an indented body, without a closing line.
    pub fn nest(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.line(header);
        self.indent();
        body(self);
        self.dedent()
    }

    /// Javadoc comment. Each input line becomes one ` * ` line; `*/` inside
    /// the text is neutralized.
    pub fn javadoc<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.line("/**");
        for text in lines {
            for l in text.as_ref().lines() {
                let l = l.trim_end().replace("*/", "*&#47;");
                if l.is_empty() {
                    self.line(" *");
                } else {
                    self.line(format!(" * {l}"));
                }
            }
        }
        self.line(" */")
    }

    pub fn each<T>(&mut self, items: impl IntoIterator<Item = T>, mut f: impl FnMut(&mut Self, T)) -> &mut Self {
        for item in items {
            f(self, item);
        }
        self
    }

    pub fn build(self) -> String {
        self.buffer
    }
}
