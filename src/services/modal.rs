// src/services/modal.rs

use crate::services::formularios::{ErrosFormulario, FormularioEntidade};

/// Estado comum de qualquer modal: visível ou não.
pub trait Modal {
    fn aberto(&self) -> bool;

    /// Valor de `aria-hidden` para o markup.
    fn aria_hidden(&self) -> &'static str {
        if self.aberto() { "false" } else { "true" }
    }
}

// ---
// Modal de criação: guarda o formulário e os erros da última tentativa
// ---
#[derive(Debug, Clone)]
pub struct ModalCriacao<F> {
    aberto: bool,
    pub form: F,
    pub erros: ErrosFormulario,
    foco: Option<&'static str>,
}

impl<F: FormularioEntidade> Default for ModalCriacao<F> {
    fn default() -> Self {
        Self {
            aberto: false,
            form: F::default(),
            erros: ErrosFormulario::default(),
            foco: None,
        }
    }
}

impl<F: FormularioEntidade> ModalCriacao<F> {
    /// Abre com o formulário limpo e o foco no primeiro campo.
    pub fn open(&mut self, inicial: F) {
        self.aberto = true;
        self.form = inicial;
        self.erros = ErrosFormulario::default();
        self.foco = Some(F::PRIMEIRO_CAMPO);
    }

    /// Mantém aberto com o que foi digitado e os erros por campo.
    pub fn mostrar_erros(&mut self, form: F, erros: ErrosFormulario) {
        self.aberto = true;
        self.form = form;
        self.erros = erros;
        self.foco = None;
    }

    pub fn close(&mut self) {
        self.aberto = false;
        self.foco = None;
    }

    pub fn foco(&self) -> Option<&'static str> {
        self.foco
    }
}

impl<F> Modal for ModalCriacao<F> {
    fn aberto(&self) -> bool {
        self.aberto
    }
}

// ---
// Modal de confirmação de exclusão: guarda o id pendente
// ---
#[derive(Debug, Clone, Default)]
pub struct ModalConfirmacao {
    alvo: Option<String>,
}

impl ModalConfirmacao {
    pub fn open(&mut self, id: impl Into<String>) {
        self.alvo = Some(id.into());
    }

    pub fn close(&mut self) {
        self.alvo = None;
    }

    pub fn alvo(&self) -> Option<&str> {
        self.alvo.as_deref()
    }
}

impl Modal for ModalConfirmacao {
    fn aberto(&self) -> bool {
        self.alvo.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sidebar {
    aberta: bool,
}

impl Sidebar {
    pub fn open(&mut self) {
        self.aberta = true;
    }

    pub fn close(&mut self) {
        self.aberta = false;
    }
}

impl Modal for Sidebar {
    fn aberto(&self) -> bool {
        self.aberta
    }
}

/// O que a tecla Escape fechou.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fechado {
    Confirmacao,
    Criacao,
    Sidebar,
}

/// Os modais de uma página de CRUD.
#[derive(Debug, Clone)]
pub struct ModaisPagina<F> {
    pub criacao: ModalCriacao<F>,
    pub confirmacao: ModalConfirmacao,
    pub sidebar: Sidebar,
}

impl<F: FormularioEntidade> Default for ModaisPagina<F> {
    fn default() -> Self {
        Self {
            criacao: ModalCriacao::default(),
            confirmacao: ModalConfirmacao::default(),
            sidebar: Sidebar::default(),
        }
    }
}

impl<F: FormularioEntidade> ModaisPagina<F> {
    /// Escape fecha só o que está por cima: confirmação, depois criação, depois a sidebar.
    pub fn escape(&mut self) -> Option<Fechado> {
        if self.confirmacao.aberto() {
            self.confirmacao.close();
            Some(Fechado::Confirmacao)
        } else if self.criacao.aberto() {
            self.criacao.close();
            Some(Fechado::Criacao)
        } else if self.sidebar.aberto() {
            self.sidebar.close();
            Some(Fechado::Sidebar)
        } else {
            None
        }
    }

    /// O body trava a rolagem enquanto algum modal estiver aberto.
    pub fn rolagem_travada(&self) -> bool {
        self.criacao.aberto() || self.confirmacao.aberto()
    }
}
