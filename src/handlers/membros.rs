// src/handlers/membros.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};

use crate::{
    common::{error::AppError, relogio::Momento},
    config::AppState,
    handlers::crud::{self, ParametrosCrud},
    middleware::{PapelMembro, SessaoAtiva},
    models::Sessao,
    services::{
        formularios::{ErrosFormulario, PedidoForm, PerfilForm},
        pagina::EstadoPagina,
        painel_service::{pagamentos_do_membro, pedidos_do_membro, total},
        toast::ToastNotifier,
    },
    views,
};

type SessaoMembro = SessaoAtiva<PapelMembro>;

pub async fn painel(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoMembro,
) -> Html<String> {
    let momento = Momento::agora();
    let painel = app_state.painel_service.painel_membro(&sessao, momento.hoje);
    let toast = ToastNotifier::new(app_state.atraso_toast);

    Html(views::painel::pagina_membro(&painel, &sessao, &toast, &momento))
}

// ---
// Leitura: comunicados, eventos e contribuições
// ---
pub async fn comunicados(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoMembro,
) -> Html<String> {
    let momento = Momento::agora();
    let itens = app_state
        .comunicados
        .repo()
        .load_for_tenant(&sessao.igreja_id, momento.hoje);
    let toast = ToastNotifier::new(app_state.atraso_toast);

    Html(views::membros::pagina_comunicados(&itens, &sessao, &toast, &momento))
}

pub async fn eventos(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoMembro,
) -> Html<String> {
    let momento = Momento::agora();
    let itens = app_state
        .eventos
        .repo()
        .load_for_tenant(&sessao.igreja_id, momento.hoje);
    let toast = ToastNotifier::new(app_state.atraso_toast);

    Html(views::membros::pagina_eventos(&itens, &sessao, &toast, &momento))
}

pub async fn pagamentos(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoMembro,
) -> Html<String> {
    let momento = Momento::agora();
    let todos = app_state
        .pagamentos
        .repo()
        .load_for_tenant(&sessao.igreja_id, momento.hoje);
    let meus = pagamentos_do_membro(todos, &sessao);
    let toast = ToastNotifier::new(app_state.atraso_toast);

    Html(views::membros::pagina_pagamentos(
        &meus,
        total(&meus),
        &sessao,
        &toast,
        &momento,
    ))
}

// ---
// Pedidos de oração do próprio membro
// ---

// A página usa o mesmo controlador da igreja, mas só mostra o que é do membro.
fn so_os_meus(mut estado: EstadoPagina<PedidoForm>, sessao: &Sessao) -> EstadoPagina<PedidoForm> {
    estado.itens = pedidos_do_membro(std::mem::take(&mut estado.itens), sessao);
    estado
}

pub async fn pedidos(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoMembro,
    Query(params): Query<ParametrosCrud>,
) -> Response {
    let momento = Momento::agora();
    let pagina = &app_state.meus_pedidos;
    // Membro não exclui pedidos
    let params = ParametrosCrud {
        excluir: None,
        ..params
    };
    let estado = so_os_meus(crud::carregar(pagina, &sessao, &params, &momento), &sessao);
    crud::responder(pagina, &estado, &sessao, &momento)
}

pub async fn enviar_pedido(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoMembro,
    Form(form): Form<PedidoForm>,
) -> Response {
    let momento = Momento::agora();
    let pagina = &app_state.meus_pedidos;
    let estado = so_os_meus(crud::criar(pagina, &sessao, form, &momento), &sessao);
    crud::responder(pagina, &estado, &sessao, &momento)
}

// ---
// Perfil
// ---
pub async fn perfil(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoMembro,
) -> Html<String> {
    let momento = Momento::agora();
    let form = PerfilForm {
        nome: sessao.nome.clone(),
        email: sessao.email.clone().unwrap_or_default(),
    };
    let toast = ToastNotifier::new(app_state.atraso_toast);

    Html(views::membros::pagina_perfil(
        &form,
        &ErrosFormulario::default(),
        &sessao,
        &toast,
        &momento,
    ))
}

pub async fn salvar_perfil(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoMembro,
    Form(form): Form<PerfilForm>,
) -> Result<Response, AppError> {
    let momento = Momento::agora();
    let mut toast = ToastNotifier::new(app_state.atraso_toast);

    let resposta = match app_state.membros_service.atualizar_perfil(
        &sessao,
        form.clone(),
        &momento,
        &mut toast,
    )? {
        Ok(nova) => {
            let form = PerfilForm {
                nome: nova.nome.clone(),
                email: nova.email.clone().unwrap_or_default(),
            };
            let html = views::membros::pagina_perfil(
                &form,
                &ErrosFormulario::default(),
                &nova,
                &toast,
                &momento,
            );
            (StatusCode::OK, Html(html)).into_response()
        }
        Err(erros) => {
            let html = views::membros::pagina_perfil(&form, &erros, &sessao, &toast, &momento);
            (StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response()
        }
    };
    Ok(resposta)
}
