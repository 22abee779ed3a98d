#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// A declaration line split into its parts, before any validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDeclaration<'a> {
    /// declared name, not yet checked to be an identifier
    pub name:      &'a str,
    /// initial value literal, if the declaration has `=`
    pub value:     Option<&'a str>,
    /// type name as written
    pub type_name: &'a str,
}

/// One argument of a `Write` statement, as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawWriteArg<'a> {
    /// a quoted string literal, quotes included
    Literal(&'a str),
    /// a constant or variable name
    Name(&'a str),
}

peg::parser! {
    /// grammars for the individual lines of an Algo program.
    pub grammar parser() for str {
        /// matches horizontal whitespace
        rule ws() = quiet!{[' ' | '\t']*}

        /// matches a letter or underscore followed by letters, digits and underscores
        pub rule identifier() -> &'input str
            = $(['a'..='z' | 'A'..='Z' | '_'] ['a'..='z' | 'A'..='Z' | '0'..='9' | '_']*)

        /// matches a run of name characters; may start with a digit
        rule name() -> &'input str
            = $(['a'..='z' | 'A'..='Z' | '0'..='9' | '_']+)

        /// matches a double-quoted string literal with backslash escapes
        pub rule string_literal() -> &'input str
            = $("\"" ("\\" [_] / [^ '"' | '\\'])* "\"")

        /// matches a single-quoted character literal
        rule char_literal()
            = "'" ("\\" [_] / [^ '\'' | '\\'])* "'"

        /// parses `Algorithm <name>;` and returns the name as written
        pub rule header() -> &'input str
            = "Algorithm" " " n:$([^ ';']*) ";" ![_] { n }

        /// parses the initial value of a declaration, which may be empty
        rule initializer() -> &'input str
            = "=" v:$((string_literal() / [^ ':' | '"' | ';'])*) { v.trim() }

        /// parses `name: Type;` or `name = value: Type;`
        pub rule declaration() -> RawDeclaration<'input>
            = n:name() ws() v:initializer()? ":" ws() t:name() ws() ";" ws() ![_]
            { RawDeclaration { name: n, value: v, type_name: t } }

        /// parses one `Write` argument
        rule write_arg() -> RawWriteArg<'input>
            = s:string_literal() { RawWriteArg::Literal(s) }
            / n:identifier() { RawWriteArg::Name(n) }

        /// parses `Write(arg, ...);`
        pub rule write_call() -> Vec<RawWriteArg<'input>>
            = "Write" ws() "(" ws() args:(write_arg() ** (ws() "," ws())) ws() ")" ws() ";" ws() ![_]
            { args }

        /// parses `Read(name, ...);`
        pub rule read_call() -> Vec<&'input str>
            = "Read" ws() "(" ws() names:(identifier() ++ (ws() "," ws())) ws() ")" ws() ";" ws() ![_]
            { names }

        /// parses `name = expression;` and returns the target and the expression;
        /// a run of trailing semicolons is accepted
        pub rule assignment() -> (&'input str, &'input str)
            = n:identifier() ws() "=" !"=" ws()
              e:$((string_literal() / [^ '"' | ';'])+)
              ";"+ ws() ![_]
            { (n, e.trim_end()) }

        /// matches a numeric literal; a `..` range operator ends it
        rule number()
            = ['0'..='9'] ['a'..='z' | 'A'..='Z' | '0'..='9' | '_']*
              ("." !"." ['a'..='z' | 'A'..='Z' | '0'..='9' | '_']*)?

        /// matches one token of an expression, yielding it if it names a binding
        rule reference_part() -> Option<&'input str>
            = string_literal() { None }
            / char_literal() { None }
            / "..=" { None }
            / ".." { None }
            / "." ws() identifier() { None }
            / number() { None }
            / identifier() ws() "(" { None }
            / n:identifier() { Some(n) }
            / [_] { None }

        /// collects the binding names an expression refers to, skipping
        /// literals, function names and method names
        pub rule references() -> Vec<&'input str>
            = parts:(reference_part()*) ![_] { parts.into_iter().flatten().collect() }
    }
}
