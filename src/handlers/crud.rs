// src/handlers/crud.rs

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    common::relogio::Momento,
    models::Sessao,
    services::pagina::{EstadoPagina, PaginaCrud},
    views::{renderizar_pagina, VisaoCrud},
};

// ---
// Parâmetros comuns às páginas de CRUD
// ---
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParametrosCrud {
    // `?novo=1` abre o modal de criação
    pub novo: Option<String>,
    // `?excluir=<id>` abre a confirmação de exclusão
    pub excluir: Option<String>,
    // `?menu=1` abre a sidebar
    pub menu: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExclusaoPayload {
    pub id: String,
}

/// Recarrega a página e reabre o modal pedido na URL.
pub fn carregar<F: VisaoCrud>(
    pagina: &PaginaCrud<F>,
    sessao: &Sessao,
    params: &ParametrosCrud,
    momento: &Momento,
) -> EstadoPagina<F> {
    let mut estado = pagina.abrir(sessao, momento);
    if params.novo.is_some() {
        pagina.abrir_criacao(&mut estado, momento);
    }
    if let Some(id) = params.excluir.as_deref() {
        pagina.solicitar_exclusao(&mut estado, id);
    }
    if params.menu.is_some() {
        estado.modais.sidebar.open();
    }
    estado
}

pub fn criar<F: VisaoCrud>(
    pagina: &PaginaCrud<F>,
    sessao: &Sessao,
    form: F,
    momento: &Momento,
) -> EstadoPagina<F> {
    let mut estado = pagina.abrir(sessao, momento);
    pagina.abrir_criacao(&mut estado, momento);
    pagina.submeter(&mut estado, sessao, form, momento);
    estado
}

/// O POST de exclusão equivale a pedir e confirmar no mesmo passo.
pub fn excluir<F: VisaoCrud>(
    pagina: &PaginaCrud<F>,
    sessao: &Sessao,
    id: &str,
    momento: &Momento,
) -> EstadoPagina<F> {
    let mut estado = pagina.abrir(sessao, momento);
    pagina.solicitar_exclusao(&mut estado, id);
    pagina.confirmar_exclusao(&mut estado, sessao, momento);
    estado
}

/// Formulário recusado responde 422; o resto, 200.
pub fn responder<F: VisaoCrud>(
    pagina: &PaginaCrud<F>,
    estado: &EstadoPagina<F>,
    sessao: &Sessao,
    momento: &Momento,
) -> Response {
    let status = if estado.modais.criacao.erros.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    let html = renderizar_pagina(pagina.config(), estado, sessao, momento);
    (status, Html(html)).into_response()
}
