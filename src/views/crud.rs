// src/views/crud.rs

use chrono::NaiveDate;

use crate::{
    common::{html::escape_html, relogio::Momento},
    models::{Papel, Sessao},
    services::{
        formularios::{ErrosFormulario, FormularioEntidade},
        modal::Modal,
        pagina::{ConfigPagina, EstadoPagina},
    },
    views::{
        layout::{toast_html, Layout},
        lista::{EstadoVazio, ItemLista, ListRenderer},
    },
};

/// Como uma entidade aparece numa página de CRUD.
pub trait VisaoCrud: FormularioEntidade {
    type Vm: ItemLista;

    const CONTAINER: &'static str;
    const ROTULO_NOVO: &'static str;

    fn to_view_model(entidade: &Self::Entidade, hoje: NaiveDate) -> Self::Vm;

    /// Miolo do item (sem o botão de excluir).
    fn item(vm: &Self::Vm) -> String;

    /// Campos do modal de criação.
    fn campos(&self, erros: &ErrosFormulario, foco: Option<&str>) -> String;

    fn vazio() -> EstadoVazio;

    /// Bloco opcional acima da lista (ex.: resumo do mês).
    fn resumo(_itens: &[Self::Entidade], _hoje: NaiveDate) -> String {
        String::new()
    }
}

// ============================================================================
// Campos de formulário
// ============================================================================

fn envolver_campo(nome: &str, rotulo: &str, controle: &str, erros: &ErrosFormulario) -> String {
    let erro = erros.get(nome);
    format!(
        r#"<div class="campo{invalido}"><label for="{nome}">{rotulo}</label>{controle}{mensagem}</div>"#,
        invalido = if erro.is_some() { " invalido" } else { "" },
        mensagem = erro
            .map(|m| format!(r#"<span class="erro-campo">{}</span>"#, escape_html(m)))
            .unwrap_or_default(),
    )
}

fn atributo_foco(nome: &str, foco: Option<&str>) -> &'static str {
    if foco == Some(nome) { " data-foco" } else { "" }
}

pub fn campo_input(
    nome: &str,
    rotulo: &str,
    tipo: &str,
    valor: &str,
    erros: &ErrosFormulario,
    foco: Option<&str>,
) -> String {
    let controle = format!(
        r#"<input id="{nome}" name="{nome}" type="{tipo}" value="{valor}"{foco}>"#,
        valor = escape_html(valor),
        foco = atributo_foco(nome, foco),
    );
    envolver_campo(nome, rotulo, &controle, erros)
}

pub fn campo_textarea(
    nome: &str,
    rotulo: &str,
    valor: &str,
    erros: &ErrosFormulario,
    foco: Option<&str>,
) -> String {
    let controle = format!(
        r#"<textarea id="{nome}" name="{nome}" rows="4"{foco}>{valor}</textarea>"#,
        valor = escape_html(valor),
        foco = atributo_foco(nome, foco),
    );
    envolver_campo(nome, rotulo, &controle, erros)
}

pub fn campo_select(
    nome: &str,
    rotulo: &str,
    opcoes: &[(&str, &str)],
    valor: &str,
    erros: &ErrosFormulario,
) -> String {
    let opcoes: String = opcoes
        .iter()
        .map(|(slug, texto)| {
            let selecionado = if *slug == valor { " selected" } else { "" };
            format!(r#"<option value="{slug}"{selecionado}>{texto}</option>"#)
        })
        .collect();
    let controle = format!(r#"<select id="{nome}" name="{nome}">{opcoes}</select>"#);
    envolver_campo(nome, rotulo, &controle, erros)
}

// ============================================================================
// Página
// ============================================================================

fn modal_criacao<F: VisaoCrud>(config: &ConfigPagina, estado: &EstadoPagina<F>) -> String {
    let modal = &estado.modais.criacao;
    format!(
        r#"<div class="modal{aberto}" id="modal-criar" role="dialog" aria-hidden="{aria}" data-ordem="2" data-fechar="{caminho}">
    <div class="caixa">
        <h3>{rotulo}</h3>
        <form method="post" action="{caminho}" novalidate>
            {campos}
            <div class="acoes"><a class="botao secundario" href="{caminho}">Cancelar</a> <button class="botao" type="submit">Salvar</button></div>
        </form>
    </div>
</div>"#,
        aberto = if modal.aberto() { " aberto" } else { "" },
        aria = modal.aria_hidden(),
        caminho = config.caminho,
        rotulo = F::ROTULO_NOVO,
        campos = modal.form.campos(&modal.erros, modal.foco()),
    )
}

fn modal_confirmacao<F: VisaoCrud>(config: &ConfigPagina, estado: &EstadoPagina<F>) -> String {
    let modal = &estado.modais.confirmacao;
    format!(
        r#"<div class="modal{aberto}" id="modal-confirmar" role="alertdialog" aria-hidden="{aria}" data-ordem="1" data-fechar="{caminho}">
    <div class="caixa">
        <h3>Confirmar exclusão</h3>
        <p>Esta ação não pode ser desfeita.</p>
        <form method="post" action="{caminho}/excluir">
            <input type="hidden" name="id" value="{alvo}">
            <a class="botao secundario" href="{caminho}">Cancelar</a> <button class="botao perigo" type="submit">Excluir</button>
        </form>
    </div>
</div>"#,
        aberto = if modal.aberto() { " aberto" } else { "" },
        aria = modal.aria_hidden(),
        caminho = config.caminho,
        alvo = escape_html(modal.alvo().unwrap_or_default()),
    )
}

/// Página completa de CRUD: cabeçalho, lista, modais e toast.
pub fn renderizar_pagina<F: VisaoCrud>(
    config: &ConfigPagina,
    estado: &EstadoPagina<F>,
    sessao: &Sessao,
    momento: &Momento,
) -> String {
    let pode_excluir = config.papel == Papel::Igreja;
    let vms: Vec<F::Vm> = estado
        .itens
        .iter()
        .map(|e| F::to_view_model(e, momento.hoje))
        .collect();

    let lista = ListRenderer::new(F::CONTAINER).render(
        &vms,
        |vm| {
            let excluir = if pode_excluir {
                format!(
                    r#"<a class="botao secundario" href="{}?excluir={}" aria-label="Excluir">Excluir</a>"#,
                    config.caminho,
                    escape_html(vm.id()),
                )
            } else {
                String::new()
            };
            format!("{}{}", F::item(vm), excluir)
        },
        &F::vazio(),
    );

    let conteudo = format!(
        r#"<div class="barra"><a class="botao" href="{caminho}?novo=1">+ {rotulo}</a></div>
{resumo}
{lista}
{criacao}
{confirmacao}"#,
        caminho = config.caminho,
        rotulo = F::ROTULO_NOVO,
        resumo = F::resumo(&estado.itens, momento.hoje),
        criacao = modal_criacao(config, estado),
        confirmacao = modal_confirmacao(config, estado),
    );

    Layout {
        titulo: config.titulo,
        sessao,
        ativo: config.caminho,
        rolagem_travada: estado.modais.rolagem_travada(),
        menu_aberto: estado.modais.sidebar.aberto(),
    }
    .render(&conteudo, &toast_html(&estado.toast, momento.instante))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::formularios::campo_invalido;

    #[test]
    fn campo_com_erro_mostra_a_mensagem() {
        let erros = ErrosFormulario::from(&campo_invalido("titulo", "Informe o título."));
        let html = campo_input("titulo", "Título", "text", "\"x\"", &erros, Some("titulo"));

        assert!(html.contains(r#"class="campo invalido""#));
        assert!(html.contains("Informe o título."));
        assert!(html.contains(r#"value="&quot;x&quot;""#));
        assert!(html.contains("data-foco"));
    }

    #[test]
    fn select_marca_a_opcao_atual() {
        let html = campo_select(
            "tipo",
            "Tipo",
            &[("dizimo", "Dízimo"), ("oferta", "Oferta")],
            "oferta",
            &ErrosFormulario::default(),
        );
        assert!(html.contains(r#"<option value="oferta" selected>Oferta</option>"#));
        assert!(!html.contains("erro-campo"));
    }
}
