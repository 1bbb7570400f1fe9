// src/handlers/igreja.rs

use axum::{
    extract::{Query, State},
    response::{Html, Response},
    Form,
};
use serde::Deserialize;

use crate::{
    common::relogio::Momento,
    config::AppState,
    handlers::crud::{self, ExclusaoPayload, ParametrosCrud},
    middleware::{PapelIgreja, SessaoAtiva},
    services::{
        formularios::{ComunicadoForm, EventoForm, PagamentoForm},
        oracao_service::FiltroPedidos,
        toast::ToastNotifier,
    },
    views,
};

type SessaoIgreja = SessaoAtiva<PapelIgreja>;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParametrosPedidos {
    pub filtro: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusPayload {
    pub id: String,
    // Aba ativa quando o botão foi clicado
    pub filtro: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParametrosBusca {
    pub q: String,
}

pub async fn painel(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoIgreja,
) -> Html<String> {
    let momento = Momento::agora();
    let painel = app_state
        .painel_service
        .painel_igreja(&sessao.igreja_id, momento.hoje);
    let toast = ToastNotifier::new(app_state.atraso_toast);

    Html(views::painel::pagina_igreja(&painel, &sessao, &toast, &momento))
}

// ---
// Comunicados
// ---
pub async fn comunicados(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoIgreja,
    Query(params): Query<ParametrosCrud>,
) -> Response {
    let momento = Momento::agora();
    let pagina = &app_state.comunicados;
    let estado = crud::carregar(pagina, &sessao, &params, &momento);
    crud::responder(pagina, &estado, &sessao, &momento)
}

pub async fn criar_comunicado(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoIgreja,
    Form(form): Form<ComunicadoForm>,
) -> Response {
    let momento = Momento::agora();
    let pagina = &app_state.comunicados;
    let estado = crud::criar(pagina, &sessao, form, &momento);
    crud::responder(pagina, &estado, &sessao, &momento)
}

pub async fn excluir_comunicado(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoIgreja,
    Form(payload): Form<ExclusaoPayload>,
) -> Response {
    let momento = Momento::agora();
    let pagina = &app_state.comunicados;
    let estado = crud::excluir(pagina, &sessao, &payload.id, &momento);
    crud::responder(pagina, &estado, &sessao, &momento)
}

// ---
// Eventos
// ---
pub async fn eventos(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoIgreja,
    Query(params): Query<ParametrosCrud>,
) -> Response {
    let momento = Momento::agora();
    let pagina = &app_state.eventos;
    let estado = crud::carregar(pagina, &sessao, &params, &momento);
    crud::responder(pagina, &estado, &sessao, &momento)
}

pub async fn criar_evento(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoIgreja,
    Form(form): Form<EventoForm>,
) -> Response {
    let momento = Momento::agora();
    let pagina = &app_state.eventos;
    let estado = crud::criar(pagina, &sessao, form, &momento);
    crud::responder(pagina, &estado, &sessao, &momento)
}

pub async fn excluir_evento(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoIgreja,
    Form(payload): Form<ExclusaoPayload>,
) -> Response {
    let momento = Momento::agora();
    let pagina = &app_state.eventos;
    let estado = crud::excluir(pagina, &sessao, &payload.id, &momento);
    crud::responder(pagina, &estado, &sessao, &momento)
}

// ---
// Pagamentos
// ---
pub async fn pagamentos(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoIgreja,
    Query(params): Query<ParametrosCrud>,
) -> Response {
    let momento = Momento::agora();
    let pagina = &app_state.pagamentos;
    let estado = crud::carregar(pagina, &sessao, &params, &momento);
    crud::responder(pagina, &estado, &sessao, &momento)
}

pub async fn criar_pagamento(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoIgreja,
    Form(form): Form<PagamentoForm>,
) -> Response {
    let momento = Momento::agora();
    let pagina = &app_state.pagamentos;
    let estado = crud::criar(pagina, &sessao, form, &momento);
    crud::responder(pagina, &estado, &sessao, &momento)
}

pub async fn excluir_pagamento(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoIgreja,
    Form(payload): Form<ExclusaoPayload>,
) -> Response {
    let momento = Momento::agora();
    let pagina = &app_state.pagamentos;
    let estado = crud::excluir(pagina, &sessao, &payload.id, &momento);
    crud::responder(pagina, &estado, &sessao, &momento)
}

// ---
// Pedidos de oração (moderação)
// ---
pub async fn pedidos(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoIgreja,
    Query(params): Query<ParametrosPedidos>,
) -> Html<String> {
    let momento = Momento::agora();
    let filtro = FiltroPedidos::from_query(params.filtro.as_deref());
    let pedidos = app_state.oracao_service.listar(&sessao.igreja_id, momento.hoje);
    let toast = ToastNotifier::new(app_state.atraso_toast);

    Html(views::pedidos::pagina_igreja(&pedidos, filtro, &sessao, &toast, &momento))
}

pub async fn alternar_status_pedido(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoIgreja,
    Form(payload): Form<StatusPayload>,
) -> Html<String> {
    let momento = Momento::agora();
    let filtro = FiltroPedidos::from_query(payload.filtro.as_deref());
    let mut toast = ToastNotifier::new(app_state.atraso_toast);

    app_state
        .oracao_service
        .alternar_status(&sessao, &payload.id, &momento, &mut toast);

    // A lista e as contagens são recalculadas depois da mudança
    let pedidos = app_state.oracao_service.listar(&sessao.igreja_id, momento.hoje);
    Html(views::pedidos::pagina_igreja(&pedidos, filtro, &sessao, &toast, &momento))
}

// ---
// Fiéis
// ---
pub async fn fieis(
    State(app_state): State<AppState>,
    SessaoAtiva(sessao, _): SessaoIgreja,
    Query(params): Query<ParametrosBusca>,
) -> Html<String> {
    let momento = Momento::agora();
    let membros = app_state.membros_service.rol(&sessao.igreja_id, momento.hoje);
    let toast = ToastNotifier::new(app_state.atraso_toast);

    Html(views::fieis::pagina(&membros, &params.q, &sessao, &toast, &momento))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::handlers::testes::{app, codigo_da_igreja, get, post, Resposta};
    use crate::services::sessao_service::LOGIN_URL;

    async fn entrar_como_igreja(app: &axum::Router) {
        let resp = post(app, LOGIN_URL, "tipo=igreja&nome=Ana&nome_igreja=Central").await;
        assert_eq!(resp.status, StatusCode::SEE_OTHER);
    }

    fn id_do_primeiro_item(resp: &Resposta) -> String {
        let marca = r#"data-id=""#;
        let inicio = resp.corpo.find(marca).expect("nenhum item na lista") + marca.len();
        let fim = resp.corpo[inicio..].find('"').expect("atributo sem fim");
        resp.corpo[inicio..inicio + fim].to_string()
    }

    #[tokio::test]
    async fn paginas_da_igreja_exigem_sessao() {
        let app = app();
        for uri in ["/igreja/painel", "/igreja/comunicados", "/igreja/fieis"] {
            let resp = get(&app, uri).await;
            assert_eq!(resp.status, StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(resp.location.as_deref(), Some(LOGIN_URL));
        }
    }

    #[tokio::test]
    async fn membro_nao_entra_na_area_da_igreja() {
        let app = app();
        entrar_como_igreja(&app).await;
        let codigo = codigo_da_igreja(&app).await;

        let corpo = format!("tipo=membro&nome=Maria&email=maria%40ex.com&codigo_igreja={codigo}");
        let resp = post(&app, LOGIN_URL, &corpo).await;
        assert_eq!(resp.location.as_deref(), Some("/membros/painel"));

        let resp = get(&app, "/igreja/comunicados").await;
        assert_eq!(resp.status, StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn comunicado_criado_aparece_na_lista_com_toast() {
        let app = app();
        entrar_como_igreja(&app).await;

        let resp = post(
            &app,
            "/igreja/comunicados",
            "titulo=Culto+de+Natal&conteudo=Dia+24&prioridade=urgente",
        )
        .await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.corpo.contains("Culto de Natal"));
        assert!(resp.corpo.contains("Comunicado publicado!"));

        let lista = get(&app, "/igreja/comunicados").await;
        assert!(lista.corpo.contains("Culto de Natal"));
    }

    #[tokio::test]
    async fn comunicado_invalido_mantem_o_modal_com_erros() {
        let app = app();
        entrar_como_igreja(&app).await;

        let resp = post(&app, "/igreja/comunicados", "titulo=&conteudo=texto").await;
        assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(resp.corpo.contains(">texto</textarea>"));
        assert!(!resp.corpo.contains("Comunicado publicado!"));

        let lista = get(&app, "/igreja/comunicados").await;
        assert!(!lista.corpo.contains(r#"data-id=""#));
    }

    #[tokio::test]
    async fn exclusao_confirmada_remove_o_item() {
        let app = app();
        entrar_como_igreja(&app).await;
        let criado = post(
            &app,
            "/igreja/eventos",
            "titulo=Retiro&descricao=&data=2030-01-10&hora=19%3A30&local=Templo",
        )
        .await;
        let id = id_do_primeiro_item(&criado);

        let confirmacao = get(&app, &format!("/igreja/eventos?excluir={id}")).await;
        assert!(confirmacao.corpo.contains(&format!(r#"name="id" value="{id}""#)));

        let resp = post(&app, "/igreja/eventos/excluir", &format!("id={id}")).await;
        assert!(resp.corpo.contains("Evento excluído."));
        assert!(!resp.corpo.contains(&format!(r#"data-id="{id}""#)));
    }

    #[tokio::test]
    async fn exclusao_sem_id_e_ignorada() {
        let app = app();
        entrar_como_igreja(&app).await;
        post(&app, "/igreja/comunicados", "titulo=Aviso&conteudo=Texto").await;

        let resp = post(&app, "/igreja/comunicados/excluir", "id=").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(!resp.corpo.contains("Comunicado excluído."));
        assert!(resp.corpo.contains("Aviso"));
    }

    #[tokio::test]
    async fn pagamento_em_reais_entra_no_resumo() {
        let app = app();
        entrar_como_igreja(&app).await;
        let resp = post(
            &app,
            "/igreja/pagamentos",
            "membro=Jo%C3%A3o&tipo=dizimo&valor=150%2C99&data=2030-01-10&descricao=",
        )
        .await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.corpo.contains("Pagamento registrado!"));
        assert!(resp.corpo.contains("150,99"));
    }

    #[tokio::test]
    async fn status_do_pedido_avanca_pelo_botao() {
        let app = app();
        entrar_como_igreja(&app).await;
        let codigo = codigo_da_igreja(&app).await;

        // Um membro envia um pedido e a igreja volta a entrar
        let corpo = format!("tipo=membro&nome=Maria&email=maria%40ex.com&codigo_igreja={codigo}");
        post(&app, LOGIN_URL, &corpo).await;
        post(&app, "/membros/pedidos-oracao", "pedido=Pela+minha+fam%C3%ADlia").await;
        entrar_como_igreja(&app).await;

        let pagina = get(&app, "/igreja/pedidos-oracao").await;
        let id = id_do_primeiro_item(&pagina);
        assert!(pagina.corpo.contains("Pela minha família"));

        let resp = post(
            &app,
            "/igreja/pedidos-oracao/status",
            &format!("id={id}&filtro=todos"),
        )
        .await;
        assert!(resp.corpo.contains("Status alterado para &quot;Orado&quot;"));
    }

    #[tokio::test]
    async fn painel_mostra_a_atividade_recente() {
        let app = app();
        entrar_como_igreja(&app).await;
        let vazio = get(&app, "/igreja/painel").await;
        assert!(vazio.corpo.contains("Nenhuma atividade ainda"));

        let codigo = codigo_da_igreja(&app).await;
        let corpo = format!("tipo=membro&nome=Maria&email=maria%40ex.com&codigo_igreja={codigo}");
        post(&app, LOGIN_URL, &corpo).await;
        post(&app, "/membros/pedidos-oracao", "pedido=Pela+sa%C3%BAde").await;
        entrar_como_igreja(&app).await;

        let resp = get(&app, "/igreja/painel").await;
        assert!(resp.corpo.contains("Atividade recente"));
        assert!(resp.corpo.contains("<strong>Maria</strong> foi cadastrado(a) como fiel."));
        assert!(resp.corpo.contains("Novo pedido de oração de <strong>Maria</strong>."));
        assert!(resp.corpo.contains(r#"<small class="quando">Agora</small>"#));
    }

    #[tokio::test]
    async fn menu_na_url_abre_a_sidebar() {
        let app = app();
        entrar_como_igreja(&app).await;

        let fechada = get(&app, "/igreja/eventos").await;
        assert!(fechada.corpo.contains(r#"<nav class="sidebar">"#));

        let aberta = get(&app, "/igreja/eventos?menu=1").await;
        assert!(aberta.corpo.contains(r#"<nav class="sidebar aberta">"#));
        // A sidebar não trava a rolagem
        assert!(!aberta.corpo.contains(r#"<body class="modal-open">"#));
    }
}
