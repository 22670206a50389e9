use logos::Logos;

#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[regex(r"#\|([^|]|\|+[^|#])*\|+#", logos::skip)]
    BlockComment,

    #[regex(r";;[^\n]*", |lex| lex.slice().to_string(), allow_greedy = true)]
    LineComment(String),

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    // Quoted strings stay atoms, quotes included, so they print back unchanged.
    #[regex(r#"[^ \t\r\n\f()"]+"#, |lex| lex.slice().to_string())]
    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice().to_string())]
    Atom(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lexeme {
    Token(Token),
    /// Text the lexer could not match.
    Invalid(String),
}

/// Splits `input` into tokens tagged with their 1-based line.
pub fn tokenize(input: &str) -> Vec<(Lexeme, usize)> {
    let mut lexer = Token::lexer(input);
    let mut out = Vec::new();
    let mut line = 1;
    let mut counted_to = 0;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        line += input[counted_to..span.start].matches('\n').count();
        counted_to = span.start;

        let lexeme = match result {
            Ok(token) => Lexeme::Token(token),
            Err(()) => Lexeme::Invalid(lexer.slice().to_string()),
        };
        out.push((lexeme, line));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input)
            .into_iter()
            .filter_map(|(l, _)| match l {
                Lexeme::Token(t) => Some(t),
                Lexeme::Invalid(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_basic_tokens() {
        let toks = tokens("(defsrc a ;)");
        assert_eq!(
            toks,
            vec![
                Token::LParen,
                Token::Atom("defsrc".into()),
                Token::Atom("a".into()),
                Token::Atom(";".into()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_comments() {
        let toks = tokens(";; layout: ansi-60\n#| block\n comment |# (a)");
        assert_eq!(
            toks,
            vec![
                Token::LineComment(";; layout: ansi-60".into()),
                Token::LParen,
                Token::Atom("a".into()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_strings_are_atoms() {
        let toks = tokens(r#"(x "hello world")"#);
        assert_eq!(toks[2], Token::Atom("\"hello world\"".into()));
    }

    #[test]
    fn test_line_tracking() {
        let lines: Vec<usize> = tokenize("a\n\nb\n  (c)").into_iter().map(|(_, l)| l).collect();
        assert_eq!(lines, vec![1, 3, 4, 4, 4]);
    }

    #[test]
    fn test_unterminated_string_is_invalid() {
        let lexemes = tokenize("a \"oops");
        assert!(lexemes
            .iter()
            .any(|(l, _)| matches!(l, Lexeme::Invalid(_))));
    }
}
