// src/middleware/sessao.rs

use std::marker::PhantomData;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{Papel, Sessao},
};

/// 1. O trait que define o papel exigido pela página
pub trait PapelDef: Send + Sync + 'static {
    fn papel() -> Papel;
}

pub struct PapelIgreja;

impl PapelDef for PapelIgreja {
    fn papel() -> Papel {
        Papel::Igreja
    }
}

pub struct PapelMembro;

impl PapelDef for PapelMembro {
    fn papel() -> Papel {
        Papel::Membro
    }
}

/// 2. O extractor (guardião): só deixa a página carregar com a sessão do papel certo.
/// Qualquer falha vira redirecionamento para a entrada, sem mensagem.
pub struct SessaoAtiva<P>(pub Sessao, pub PhantomData<P>);

impl<P> SessaoAtiva<P> {
    pub fn sessao(&self) -> &Sessao {
        &self.0
    }
}

// 3. Implementação do FromRequestParts
impl<P, S> FromRequestParts<S> for SessaoAtiva<P>
where
    P: PapelDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        match app_state.sessao_service.guard().exigir(P::papel()) {
            Ok(sessao) => Ok(SessaoAtiva(sessao, PhantomData)),
            Err(falha) => {
                tracing::info!("🔒 {} recusada: {:?}", parts.uri.path(), falha);
                Err(AppError::SessaoInvalida)
            }
        }
    }
}
