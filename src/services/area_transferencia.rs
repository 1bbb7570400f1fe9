// src/services/area_transferencia.rs

use std::time::Instant;

use thiserror::Error;

use crate::services::toast::{Toast, ToastNotifier};

#[derive(Debug, Error)]
#[error("cópia recusada: {0}")]
pub struct FalhaCopia(pub String);

// Textos do aviso. O botão da página de fiéis leva os mesmos em `data-msg-*`.
pub const MSG_SEM_CODIGO: &str = "Código da igreja não disponível";
pub const MSG_COPIADO: &str = "Código copiado: ";
pub const MSG_FALHA: &str = "Não foi possível copiar. Código: ";

/// Um mecanismo de cópia (a área de transferência moderna ou a antiga).
pub trait AreaTransferencia {
    fn copiar(&self, texto: &str) -> Result<(), FalhaCopia>;
}

/// Copia o código da igreja: tenta a principal, depois a legada, e avisa.
///
/// O script do botão "Copiar" segue a mesma ordem no navegador
/// (`navigator.clipboard`, depois `execCommand`).
pub fn copiar_codigo<'a>(
    codigo: Option<&str>,
    principal: &dyn AreaTransferencia,
    legada: &dyn AreaTransferencia,
    toast: &'a mut ToastNotifier,
    agora: Instant,
) -> &'a Toast {
    let Some(codigo) = codigo.map(str::trim).filter(|c| !c.is_empty()) else {
        return toast.erro(MSG_SEM_CODIGO, agora);
    };

    let copiado = match principal.copiar(codigo) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("Área de transferência principal falhou ({}), tentando a legada", e);
            legada.copiar(codigo).is_ok()
        }
    };

    if copiado {
        toast.sucesso(format!("{}{}", MSG_COPIADO, codigo), agora)
    } else {
        toast.erro(format!("{}{}", MSG_FALHA, codigo), agora)
    }
}
