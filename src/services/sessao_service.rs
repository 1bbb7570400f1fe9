// src/services/sessao_service.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Map;
use validator::{Validate, ValidationErrors};

use crate::{
    common::{
        error::AppError,
        id::{gerar_codigo_igreja, gerar_id_unico},
    },
    db::{LocalStorage, Repository},
    models::{sessao::EntradaPayload, Entidade, Igreja, Membro, Papel, Sessao, SESSION_KEY},
    services::formularios::{email_obrigatorio, erro},
};

/// Página de entrada (a mesma para igreja e membro).
pub const LOGIN_URL: &str = "/autenticacao/login";

/// Por que uma página protegida recusou a sessão.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FalhaSessao {
    Ausente,
    // JSON ilegível: a chave é apagada
    Corrompida,
    // JSON válido mas sem os campos esperados (ou `igrejaId` vazio)
    Incompleta,
    PapelErrado,
}

/// O guardião das páginas: lê `cf_sessao` e confere o papel.
#[derive(Clone)]
pub struct SessionGuard {
    storage: Arc<dyn LocalStorage>,
}

impl SessionGuard {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// Lê a sessão gravada, sem olhar o papel.
    pub fn ler(&self) -> Result<Sessao, FalhaSessao> {
        let raw = self.storage.get_item(SESSION_KEY).ok_or(FalhaSessao::Ausente)?;

        let valor: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("⚠️ Sessão com JSON inválido ({}), removendo", e);
                if let Err(e) = self.storage.remove_item(SESSION_KEY) {
                    tracing::error!("Falha ao remover sessão corrompida: {}", e);
                }
                return Err(FalhaSessao::Corrompida);
            }
        };

        let sessao: Sessao =
            serde_json::from_value(valor).map_err(|_| FalhaSessao::Incompleta)?;
        if sessao.igreja_id.trim().is_empty() {
            return Err(FalhaSessao::Incompleta);
        }
        Ok(sessao)
    }

    /// Sessão do papel pedido, ou o motivo da recusa.
    pub fn exigir(&self, papel: Papel) -> Result<Sessao, FalhaSessao> {
        let sessao = self.ler()?;
        if sessao.tipo != papel {
            return Err(FalhaSessao::PapelErrado);
        }
        Ok(sessao)
    }

    pub fn gravar(&self, sessao: &Sessao) -> Result<(), AppError> {
        let json = serde_json::to_string(sessao)?;
        self.storage.set_item(SESSION_KEY, &json)
    }

    pub fn encerrar(&self) -> Result<(), AppError> {
        self.storage.remove_item(SESSION_KEY)
    }
}

/// Entrada e saída: acha (ou cria) a igreja e o membro e grava a sessão.
#[derive(Clone)]
pub struct SessaoService {
    guard: SessionGuard,
    igrejas: Repository<Igreja>,
    membros: Repository<Membro>,
}

impl SessaoService {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            guard: SessionGuard::new(storage.clone()),
            igrejas: Repository::new(storage.clone()),
            membros: Repository::new(storage),
        }
    }

    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    /// Valida a entrada e grava a sessão do papel escolhido.
    pub fn entrar(
        &self,
        mut payload: EntradaPayload,
        agora: DateTime<Utc>,
    ) -> Result<Sessao, AppError> {
        payload.tipo = payload.tipo.trim().to_lowercase();
        payload.nome = payload.nome.trim().to_string();
        payload.email = payload.email.trim().to_string();
        payload.nome_igreja = payload.nome_igreja.trim().to_string();
        payload.codigo_igreja = payload.codigo_igreja.trim().to_uppercase();

        let mut errors = payload.validate().err().unwrap_or_else(ValidationErrors::new);

        let sessao = match payload.tipo.as_str() {
            "igreja" => {
                if payload.nome_igreja.chars().count() < 2 {
                    errors.add("nome_igreja", erro("required", "Informe o nome da igreja."));
                }
                if !errors.errors().is_empty() {
                    return Err(AppError::Validacao(errors));
                }
                self.entrar_como_igreja(&payload, agora)?
            }
            "membro" => {
                if let Err(e) = email_obrigatorio(&payload.email) {
                    errors.add("email", e);
                }
                let igreja = if payload.codigo_igreja.is_empty() {
                    errors.add("codigo_igreja", erro("required", "Informe o código da igreja."));
                    None
                } else {
                    let igreja = self.igreja_por_codigo(&payload.codigo_igreja);
                    if igreja.is_none() {
                        errors.add(
                            "codigo_igreja",
                            erro("not_found", "Nenhuma igreja encontrada com esse código."),
                        );
                    }
                    igreja
                };
                match igreja {
                    Some(igreja) if errors.errors().is_empty() => {
                        self.entrar_como_membro(&payload, igreja, agora)?
                    }
                    _ => return Err(AppError::Validacao(errors)),
                }
            }
            _ => {
                errors.add("tipo", erro("choice", "Escolha como deseja entrar."));
                return Err(AppError::Validacao(errors));
            }
        };

        self.guard.gravar(&sessao)?;
        tracing::info!("✅ Sessão iniciada: {:?} em {}", sessao.tipo, sessao.igreja_id);
        Ok(sessao)
    }

    pub fn sair(&self) -> Result<(), AppError> {
        self.guard.encerrar()?;
        tracing::info!("Sessão encerrada");
        Ok(())
    }

    /// Igreja pelo código de entrada (sem diferenciar maiúsculas).
    pub fn igreja_por_codigo(&self, codigo: &str) -> Option<Igreja> {
        self.igrejas
            .load_all()
            .into_iter()
            .find(|i| i.codigo.eq_ignore_ascii_case(codigo))
    }

    fn entrar_como_igreja(
        &self,
        payload: &EntradaPayload,
        agora: DateTime<Utc>,
    ) -> Result<Sessao, AppError> {
        let existente = self
            .igrejas
            .load_all()
            .into_iter()
            .find(|i| i.nome.to_lowercase() == payload.nome_igreja.to_lowercase());

        let igreja = match existente {
            Some(igreja) => igreja,
            None => {
                let todas = self.igrejas.load_all();
                let mut codigo = gerar_codigo_igreja();
                while todas.iter().any(|i| i.codigo == codigo) {
                    codigo = gerar_codigo_igreja();
                }
                let igreja = Igreja {
                    id: gerar_id_unico(Igreja::PREFIXO_ID, agora, |id| self.igrejas.contains_id(id)),
                    nome: payload.nome_igreja.clone(),
                    codigo,
                    criado_em: agora,
                };
                self.igrejas.create(&igreja)?;
                tracing::info!("⛪ Igreja cadastrada: {} ({})", igreja.nome, igreja.codigo);
                igreja
            }
        };

        Ok(Sessao {
            id: None,
            igreja_id: igreja.id,
            tipo: Papel::Igreja,
            nome: payload.nome.clone(),
            nome_igreja: igreja.nome,
            email: Some(payload.email.clone()).filter(|e| !e.is_empty()),
            codigo_igreja: Some(igreja.codigo),
            logado_em: Some(agora),
            extras: Map::new(),
        })
    }

    fn entrar_como_membro(
        &self,
        payload: &EntradaPayload,
        igreja: Igreja,
        agora: DateTime<Utc>,
    ) -> Result<Sessao, AppError> {
        let existente = self.membros.load_all().into_iter().find(|m| {
            m.igreja_id == igreja.id && m.email.eq_ignore_ascii_case(&payload.email)
        });

        let membro = match existente {
            Some(membro) => membro,
            None => {
                let membro = Membro {
                    id: gerar_id_unico(Membro::PREFIXO_ID, agora, |id| self.membros.contains_id(id)),
                    igreja_id: igreja.id.clone(),
                    nome_completo: payload.nome.clone(),
                    email: payload.email.clone(),
                    criado_em: Some(agora),
                };
                self.membros.create(&membro)?;
                tracing::info!("🙋 Novo membro em {}: {}", igreja.nome, membro.id);
                membro
            }
        };

        Ok(Sessao {
            id: Some(membro.id),
            igreja_id: igreja.id,
            tipo: Papel::Membro,
            nome: membro.nome_completo,
            nome_igreja: igreja.nome,
            email: Some(membro.email),
            codigo_igreja: Some(igreja.codigo),
            logado_em: Some(agora),
            extras: Map::new(),
        })
    }
}
