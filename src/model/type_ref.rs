//! Parse the host's textual type renderings into [`TypeRef`]s.
//!
//! Hosts render a field's declared type the way their reflection API prints it. Besides plain qualified names
//! this includes generic arguments, wildcards, array suffixes and type-use annotations, e.g.
//! `(@javax.validation.constraints.Size(min=1, max=10) :: java.lang.String)`. Annotations carry no information
//! the generator needs, so they are skipped during parsing.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Errors produced while parsing a type rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeRefError {
    #[error("empty type")]
    Empty,

    #[error("unexpected '{found}' at offset {offset} in type `{input}`")]
    Unexpected { found: char, offset: usize, input: String },

    #[error("unexpected end of type `{input}`")]
    UnexpectedEnd { input: String },
}

/// A declared type: erased qualified name, generic arguments and array dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct TypeRef {
    name: String,
    args: Vec<TypeRef>,
    array_dims: usize,
}

/// Implicit bound of an unbounded wildcard (`?`).
const WILDCARD_BOUND: &str = "java.lang.Object";

impl TypeRef {
    /// A non-generic, non-array type.
    pub fn simple(name: &str) -> Self {
        Self {
            name: name.to_string(),
            args: Vec::new(),
            array_dims: 0,
        }
    }

    /// A parameterized type (`java.util.List<Contact>`).
    pub fn generic(name: &str, args: Vec<TypeRef>) -> Self {
        Self {
            name: name.to_string(),
            args,
            array_dims: 0,
        }
    }

    /// Parse a host type rendering.
    pub fn parse(input: &str) -> Result<Self, TypeRefError> {
        if input.trim().is_empty() {
            return Err(TypeRefError::Empty);
        }
        let mut parser = Parser { input, pos: 0 };
        let ty = parser.parse_type()?;
        parser.skip_ws();
        match parser.peek() {
            None => Ok(ty),
            Some(found) => Err(parser.unexpected(found)),
        }
    }

    /// Erased element name, without generic arguments or array suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[TypeRef] {
        &self.args
    }

    /// The only type argument, if the type has exactly one.
    pub fn single_arg(&self) -> Option<&TypeRef> {
        match self.args.as_slice() {
            [arg] => Some(arg),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        self.array_dims > 0
    }

    /// Erased spelling including array suffixes (`byte[]`), as used for registry lookups.
    pub fn erased(&self) -> String {
        let mut out = self.name.clone();
        for _ in 0..self.array_dims {
            out.push_str("[]");
        }
        out
    }

    /// Short name of the erased element type (`String` for `java.lang.String`).
    pub fn short_name(&self) -> &str {
        querybean_core::names::short_name_of(&self.name)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", arg)?;
            }
            f.write_str(">")?;
        }
        for _ in 0..self.array_dims {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

impl FromStr for TypeRef {
    type Err = TypeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeRef::parse(s)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = TypeRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TypeRef::parse(&value)
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn parse_type(&mut self) -> Result<TypeRef, TypeRefError> {
        self.skip_ws();
        self.skip_annotations()?;

        // (@Anno(...) :: java.lang.String)
        if self.eat('(') {
            self.skip_annotations()?;
            self.expect("::")?;
            let inner = self.parse_type()?;
            self.skip_ws();
            self.expect(")")?;
            return self.parse_array_suffix(inner);
        }

        if self.eat('?') {
            self.skip_ws();
            if self.eat_keyword("extends") || self.eat_keyword("super") {
                return self.parse_type();
            }
            return Ok(TypeRef::simple(WILDCARD_BOUND));
        }

        let name = self.parse_qualified_name()?;
        let mut args = Vec::new();
        self.skip_ws();
        if self.eat('<') {
            loop {
                args.push(self.parse_type()?);
                self.skip_ws();
                if self.eat(',') {
                    continue;
                }
                self.expect(">")?;
                break;
            }
        }
        self.parse_array_suffix(TypeRef::generic(&name, args))
    }

    fn parse_array_suffix(&mut self, mut ty: TypeRef) -> Result<TypeRef, TypeRefError> {
        loop {
            self.skip_ws();
            if !self.eat('[') {
                return Ok(ty);
            }
            self.skip_ws();
            self.expect("]")?;
            ty.array_dims += 1;
        }
    }

    fn parse_qualified_name(&mut self) -> Result<String, TypeRefError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' || c == '.' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(found) => self.unexpected(found),
                None => self.unexpected_end(),
            });
        }
        Ok(self.input[start..self.pos].to_string())
    }

    /// Skip any number of `@a.b.Anno` / `@a.b.Anno(...)` annotations.
    fn skip_annotations(&mut self) -> Result<(), TypeRefError> {
        loop {
            self.skip_ws();
            if !self.eat('@') {
                return Ok(());
            }
            self.parse_qualified_name()?;
            if self.peek() == Some('(') {
                self.skip_balanced_parens()?;
            }
        }
    }

    fn skip_balanced_parens(&mut self) -> Result<(), TypeRefError> {
        let mut depth = 0usize;
        let mut in_string = false;
        while let Some(c) = self.peek() {
            self.pos += c.len_utf8();
            match c {
                '"' => in_string = !in_string,
                '(' if !in_string => depth += 1,
                ')' if !in_string => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
        Err(self.unexpected_end())
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let rest = &self.input[self.pos..];
        let Some(after) = rest.strip_prefix(keyword) else {
            return false;
        };
        if after.chars().next().is_none_or(|c| c.is_whitespace()) {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &str) -> Result<(), TypeRefError> {
        self.skip_ws();
        if self.input[self.pos..].starts_with(expected) {
            self.pos += expected.len();
            return Ok(());
        }
        Err(match self.peek() {
            Some(found) => self.unexpected(found),
            None => self.unexpected_end(),
        })
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn unexpected(&self, found: char) -> TypeRefError {
        TypeRefError::Unexpected {
            found,
            offset: self.pos,
            input: self.input.to_string(),
        }
    }

    fn unexpected_end(&self) -> TypeRefError {
        TypeRefError::UnexpectedEnd {
            input: self.input.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_qualified_name() {
        let ty = TypeRef::parse("java.lang.String").unwrap();
        assert_eq!(ty.name(), "java.lang.String");
        assert!(ty.args().is_empty());
        assert_eq!(ty.short_name(), "String");
    }

    #[test]
    fn parenthesised_type_use_annotation_is_stripped() {
        let ty = TypeRef::parse("(@javax.validation.constraints.Size(min=1, max=10) :: java.lang.String)").unwrap();
        assert_eq!(ty, TypeRef::simple("java.lang.String"));
    }

    #[test]
    fn prefix_annotation_is_stripped() {
        let ty = TypeRef::parse("@javax.validation.constraints.NotNull java.lang.Long").unwrap();
        assert_eq!(ty, TypeRef::simple("java.lang.Long"));
    }

    #[test]
    fn annotation_with_parens_inside_string_value() {
        let ty = TypeRef::parse("(@a.Pattern(regexp=\"(x|y)\") :: java.lang.String)").unwrap();
        assert_eq!(ty.name(), "java.lang.String");
    }

    #[test]
    fn generic_arguments() {
        let ty = TypeRef::parse("java.util.Map<java.lang.String, java.util.List<org.example.Contact>>").unwrap();
        assert_eq!(ty.name(), "java.util.Map");
        assert_eq!(ty.args().len(), 2);
        assert_eq!(ty.args()[1].single_arg().map(|t| t.name()), Some("org.example.Contact"));
        assert!(ty.single_arg().is_none());
        assert_eq!(
            ty.to_string(),
            "java.util.Map<java.lang.String,java.util.List<org.example.Contact>>"
        );
    }

    #[test]
    fn annotated_generic_argument() {
        let ty = TypeRef::parse("java.util.List<(@javax.validation.Valid :: org.example.Contact)>").unwrap();
        assert_eq!(ty.single_arg(), Some(&TypeRef::simple("org.example.Contact")));
    }

    #[test]
    fn wildcards_resolve_to_their_bound() {
        let ty = TypeRef::parse("java.util.Set<? extends org.example.Contact>").unwrap();
        assert_eq!(ty.single_arg().map(|t| t.name()), Some("org.example.Contact"));

        let ty = TypeRef::parse("java.util.Set<?>").unwrap();
        assert_eq!(ty.single_arg().map(|t| t.name()), Some("java.lang.Object"));
    }

    #[test]
    fn array_suffix() {
        let ty = TypeRef::parse("byte[]").unwrap();
        assert!(ty.is_array());
        assert_eq!(ty.name(), "byte");
        assert_eq!(ty.erased(), "byte[]");
    }

    #[test]
    fn malformed_renderings_are_errors() {
        assert_eq!(TypeRef::parse("  "), Err(TypeRefError::Empty));
        assert!(matches!(
            TypeRef::parse("java.util.List<java.lang.String"),
            Err(TypeRefError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            TypeRef::parse("java.lang.String>"),
            Err(TypeRefError::Unexpected { found: '>', .. })
        ));
    }
}
