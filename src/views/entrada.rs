// src/views/entrada.rs

use crate::{
    models::sessao::EntradaPayload,
    services::{formularios::ErrosFormulario, sessao_service::LOGIN_URL},
    views::{
        crud::{campo_input, campo_select},
        layout::base_html,
    },
};

/// Página de entrada: a igreja informa o próprio nome; o membro, o código da igreja.
pub fn pagina(payload: &EntradaPayload, erros: &ErrosFormulario) -> String {
    let tipo = if payload.tipo.is_empty() { "igreja" } else { payload.tipo.as_str() };

    let corpo = format!(
        r#"<main class="conteudo entrada">
    <h1>⛪ Congrega Fiel</h1>
    <p>Entre como administrador da igreja ou como membro.</p>
    <form class="card" method="post" action="{LOGIN_URL}" novalidate>
        {tipo}
        {nome}
        {email}
        <fieldset data-papel="igreja">
            {nome_igreja}
        </fieldset>
        <fieldset data-papel="membro">
            {codigo}
        </fieldset>
        <button class="botao" type="submit">Entrar</button>
    </form>
</main>"#,
        tipo = campo_select(
            "tipo",
            "Entrar como",
            &[("igreja", "Igreja"), ("membro", "Membro")],
            tipo,
            erros,
        ),
        nome = campo_input("nome", "Seu nome", "text", &payload.nome, erros, Some("nome")),
        email = campo_input("email", "E-mail", "email", &payload.email, erros, None),
        nome_igreja = campo_input(
            "nome_igreja",
            "Nome da igreja",
            "text",
            &payload.nome_igreja,
            erros,
            None,
        ),
        codigo = campo_input(
            "codigo_igreja",
            "Código da igreja",
            "text",
            &payload.codigo_igreja,
            erros,
            None,
        ),
    );

    base_html("Entrar", &corpo, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::formularios::campo_invalido;

    #[test]
    fn entrada_mostra_o_erro_do_codigo() {
        let payload = EntradaPayload {
            tipo: "membro".into(),
            codigo_igreja: "<x>".into(),
            ..EntradaPayload::default()
        };
        let erros = ErrosFormulario::from(&campo_invalido(
            "codigo_igreja",
            "Nenhuma igreja encontrada com esse código.",
        ));

        let html = pagina(&payload, &erros);
        assert!(html.contains("Nenhuma igreja encontrada com esse código."));
        assert!(html.contains(r#"<option value="membro" selected>"#));
        assert!(html.contains(r#"value="&lt;x&gt;""#));
    }
}
