// src/views/membros.rs

use rust_decimal::Decimal;

use crate::{
    common::{html::escape_html, relogio::Momento},
    models::{Comunicado, Evento, Pagamento, Sessao},
    services::{
        formularios::{ErrosFormulario, PerfilForm},
        toast::ToastNotifier,
    },
    views::{
        comunicados,
        crud::campo_input,
        eventos,
        layout::{toast_html, Layout},
        lista::ListRenderer,
        pagamentos,
    },
};

fn pagina(titulo: &str, ativo: &str, conteudo: &str, sessao: &Sessao, toast: &ToastNotifier, momento: &Momento) -> String {
    Layout {
        titulo,
        sessao,
        ativo,
        rolagem_travada: false,
        menu_aberto: false,
    }
    .render(conteudo, &toast_html(toast, momento.instante))
}

/// Comunicados da igreja, só leitura.
pub fn pagina_comunicados(
    itens: &[Comunicado],
    sessao: &Sessao,
    toast: &ToastNotifier,
    momento: &Momento,
) -> String {
    let vms: Vec<_> = itens.iter().map(comunicados::to_view_model).collect();
    let lista = ListRenderer::new("lista-comunicados").render(
        &vms,
        comunicados::item,
        &comunicados::vazio(),
    );
    pagina("Comunicados", "/membros/comunicados", &lista, sessao, toast, momento)
}

/// Eventos da igreja, só leitura, com a mesma ordem da igreja.
pub fn pagina_eventos(
    itens: &[Evento],
    sessao: &Sessao,
    toast: &ToastNotifier,
    momento: &Momento,
) -> String {
    let vms: Vec<_> = itens
        .iter()
        .map(|e| eventos::to_view_model(e, momento.hoje))
        .collect();
    let lista = ListRenderer::new("lista-eventos").render(&vms, eventos::item, &eventos::vazio());
    pagina("Eventos", "/membros/eventos", &lista, sessao, toast, momento)
}

/// Pagamentos lançados em nome do membro, com total e contagem.
pub fn pagina_pagamentos(
    itens: &[Pagamento],
    total: Decimal,
    sessao: &Sessao,
    toast: &ToastNotifier,
    momento: &Momento,
) -> String {
    let vms: Vec<_> = itens.iter().map(pagamentos::to_view_model).collect();
    let conteudo = format!(
        "{}\n{}",
        pagamentos::total_membro_html(total, itens.len()),
        ListRenderer::new("lista-pagamentos").render(&vms, pagamentos::item, &pagamentos::vazio()),
    );
    pagina("Meus Pagamentos", "/membros/pagamentos", &conteudo, sessao, toast, momento)
}

pub fn pagina_perfil(
    form: &PerfilForm,
    erros: &ErrosFormulario,
    sessao: &Sessao,
    toast: &ToastNotifier,
    momento: &Momento,
) -> String {
    let conteudo = format!(
        r#"<div class="card">
    <p>Igreja: <strong>{igreja}</strong></p>
    <form method="post" action="/membros/perfil" novalidate>
        {nome}
        {email}
        <button class="botao" type="submit">Salvar</button>
    </form>
</div>"#,
        igreja = escape_html(&sessao.nome_igreja),
        nome = campo_input("nome", "Nome completo", "text", &form.nome, erros, None),
        email = campo_input("email", "E-mail", "email", &form.email, erros, None),
    );
    pagina("Meu Perfil", "/membros/perfil", &conteudo, sessao, toast, momento)
}
