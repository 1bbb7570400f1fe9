// src/common/html.rs

/// Escapa texto fornecido pelo usuário antes de inseri-lo em HTML.
///
/// Vale tanto para conteúdo de elementos quanto para valores de atributos
/// entre aspas duplas ou simples.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Iniciais para o avatar: primeira letra das duas primeiras palavras.
pub fn iniciais(nome: &str) -> String {
    let letras: String = nome
        .split_whitespace()
        .filter_map(|palavra| palavra.chars().next())
        .take(2)
        .collect();

    if letras.is_empty() {
        "?".to_string()
    } else {
        letras.to_uppercase()
    }
}

/// Primeiro nome, usado nas saudações ("Bem-vindo, Ana").
pub fn primeiro_nome(nome: &str) -> &str {
    nome.split_whitespace().next().unwrap_or("")
}
