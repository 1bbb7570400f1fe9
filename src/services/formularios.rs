// src/services/formularios.rs

use std::{borrow::Cow, collections::BTreeMap};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::{
    common::formato::parse_valor,
    models::{
        Comunicado, Entidade, Evento, Pagamento, PedidoOracao, Prioridade, Sessao, StatusPedido,
        TipoPagamento,
    },
};

// =========================================================================
//  ERROS POR CAMPO
// =========================================================================

/// Primeira mensagem de cada campo inválido, pronta para o template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrosFormulario(BTreeMap<String, String>);

impl ErrosFormulario {
    pub fn get(&self, campo: &str) -> Option<&str> {
        self.0.get(campo).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn campos(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<&ValidationErrors> for ErrosFormulario {
    fn from(errors: &ValidationErrors) -> Self {
        let mut mapa = BTreeMap::new();
        for (campo, field_errors) in errors.field_errors() {
            let mensagem = field_errors
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "Campo inválido.".to_string());
            mapa.insert(campo.to_string(), mensagem);
        }
        ErrosFormulario(mapa)
    }
}

/// Erro de validação com código e mensagem para o usuário.
pub fn erro(codigo: &'static str, mensagem: &'static str) -> ValidationError {
    ValidationError::new(codigo).with_message(Cow::Borrowed(mensagem))
}

/// `ValidationErrors` com um único campo inválido.
pub fn campo_invalido(campo: &'static str, mensagem: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(campo, erro("invalid", mensagem));
    errors
}

// Obrigatório e, se preenchido, com pelo menos `minimo` caracteres
fn obrigatorio_com_minimo(
    valor: &str,
    minimo: usize,
    msg_vazio: &'static str,
    msg_curto: &'static str,
) -> Result<(), ValidationError> {
    if valor.is_empty() {
        return Err(erro("required", msg_vazio));
    }
    if valor.chars().count() < minimo {
        return Err(erro("length", msg_curto));
    }
    Ok(())
}

fn parse_data(valor: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(valor, "%Y-%m-%d").ok()
}

fn parse_hora(valor: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(valor, "%H:%M").ok()
}

fn aparar(campo: &mut String) {
    let aparado = campo.trim();
    if aparado.len() != campo.len() {
        *campo = aparado.to_string();
    }
}

// =========================================================================
//  CONTRATO DOS FORMULÁRIOS DE CRIAÇÃO
// =========================================================================

/// Um formulário que cria uma entidade da igreja da sessão.
pub trait FormularioEntidade: Validate + Clone + Default {
    type Entidade: Entidade;

    /// Nome do campo que recebe o foco ao abrir o modal.
    const PRIMEIRO_CAMPO: &'static str;

    /// Valores iniciais do modal de criação.
    fn inicial(_hoje: NaiveDate) -> Self {
        Self::default()
    }

    /// Apara espaços antes da validação.
    fn normalizar(&mut self);

    /// Converte um formulário já validado.
    fn para_entidade(
        &self,
        id: String,
        sessao: &Sessao,
        agora: DateTime<Utc>,
    ) -> Result<Self::Entidade, ValidationErrors>;

    /// Normaliza, valida (todos os campos de uma vez) e converte.
    fn validar(
        &mut self,
        id: String,
        sessao: &Sessao,
        agora: DateTime<Utc>,
    ) -> Result<Self::Entidade, ValidationErrors> {
        self.normalizar();
        self.validate()?;
        self.para_entidade(id, sessao, agora)
    }
}

// =========================================================================
//  COMUNICADO
// =========================================================================

fn titulo_comunicado(valor: &str) -> Result<(), ValidationError> {
    obrigatorio_com_minimo(valor, 1, "Informe o título do comunicado.", "")
}

fn conteudo_comunicado(valor: &str) -> Result<(), ValidationError> {
    obrigatorio_com_minimo(valor, 1, "Escreva o conteúdo do comunicado.", "")
}

fn prioridade_valida(valor: &str) -> Result<(), ValidationError> {
    match valor {
        "" | "normal" | "urgente" => Ok(()),
        _ => Err(erro("choice", "Escolha a prioridade.")),
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ComunicadoForm {
    #[validate(custom(function = "titulo_comunicado"))]
    pub titulo: String,
    #[validate(custom(function = "conteudo_comunicado"))]
    pub conteudo: String,
    #[validate(custom(function = "prioridade_valida"))]
    pub prioridade: String,
}

impl FormularioEntidade for ComunicadoForm {
    type Entidade = Comunicado;
    const PRIMEIRO_CAMPO: &'static str = "titulo";

    fn normalizar(&mut self) {
        aparar(&mut self.titulo);
        aparar(&mut self.conteudo);
        aparar(&mut self.prioridade);
    }

    fn para_entidade(
        &self,
        id: String,
        sessao: &Sessao,
        agora: DateTime<Utc>,
    ) -> Result<Comunicado, ValidationErrors> {
        let prioridade = if self.prioridade == "urgente" {
            Prioridade::Urgente
        } else {
            Prioridade::Normal
        };

        Ok(Comunicado {
            id,
            igreja_id: sessao.igreja_id.clone(),
            titulo: self.titulo.clone(),
            conteudo: self.conteudo.clone(),
            prioridade,
            criado_em: agora,
        })
    }
}

// =========================================================================
//  EVENTO
// =========================================================================

fn titulo_evento(valor: &str) -> Result<(), ValidationError> {
    obrigatorio_com_minimo(
        valor,
        3,
        "Informe o título do evento.",
        "O título deve ter pelo menos 3 caracteres.",
    )
}

fn local_evento(valor: &str) -> Result<(), ValidationError> {
    obrigatorio_com_minimo(
        valor,
        2,
        "Informe o local do evento.",
        "O local deve ter pelo menos 2 caracteres.",
    )
}

fn data_evento(valor: &str) -> Result<(), ValidationError> {
    if valor.is_empty() {
        return Err(erro("required", "Selecione a data do evento."));
    }
    parse_data(valor)
        .map(|_| ())
        .ok_or_else(|| erro("date", "Data inválida."))
}

fn hora_evento(valor: &str) -> Result<(), ValidationError> {
    if valor.is_empty() {
        return Err(erro("required", "Informe o horário do evento."));
    }
    parse_hora(valor)
        .map(|_| ())
        .ok_or_else(|| erro("time", "Use o formato HH:MM."))
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct EventoForm {
    #[validate(custom(function = "titulo_evento"))]
    pub titulo: String,
    pub descricao: String,
    #[validate(custom(function = "data_evento"))]
    pub data: String,
    #[validate(custom(function = "hora_evento"))]
    pub hora: String,
    #[validate(custom(function = "local_evento"))]
    pub local: String,
}

impl FormularioEntidade for EventoForm {
    type Entidade = Evento;
    const PRIMEIRO_CAMPO: &'static str = "titulo";

    fn normalizar(&mut self) {
        aparar(&mut self.titulo);
        aparar(&mut self.descricao);
        aparar(&mut self.data);
        aparar(&mut self.hora);
        aparar(&mut self.local);
    }

    fn para_entidade(
        &self,
        id: String,
        sessao: &Sessao,
        agora: DateTime<Utc>,
    ) -> Result<Evento, ValidationErrors> {
        let data = parse_data(&self.data)
            .ok_or_else(|| campo_invalido("data", "Data inválida."))?;
        let hora = parse_hora(&self.hora)
            .ok_or_else(|| campo_invalido("hora", "Use o formato HH:MM."))?;

        Ok(Evento {
            id,
            igreja_id: sessao.igreja_id.clone(),
            titulo: self.titulo.clone(),
            descricao: self.descricao.clone(),
            data,
            hora: hora.format("%H:%M").to_string(),
            local: self.local.clone(),
            criado_em: agora,
        })
    }
}

// =========================================================================
//  PAGAMENTO
// =========================================================================

fn membro_pagamento(valor: &str) -> Result<(), ValidationError> {
    obrigatorio_com_minimo(valor, 1, "Informe o nome do membro.", "")
}

fn tipo_pagamento(valor: &str) -> Result<(), ValidationError> {
    TipoPagamento::from_slug(valor)
        .map(|_| ())
        .ok_or_else(|| erro("choice", "Selecione o tipo de pagamento."))
}

fn valor_pagamento(valor: &str) -> Result<(), ValidationError> {
    match parse_valor(valor) {
        Some(v) if v > rust_decimal::Decimal::ZERO => Ok(()),
        _ => Err(erro("range", "Informe um valor válido.")),
    }
}

fn data_pagamento(valor: &str) -> Result<(), ValidationError> {
    parse_data(valor)
        .map(|_| ())
        .ok_or_else(|| erro("required", "Informe a data."))
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PagamentoForm {
    #[validate(custom(function = "membro_pagamento"))]
    pub membro: String,
    #[validate(custom(function = "tipo_pagamento"))]
    pub tipo: String,
    #[validate(custom(function = "valor_pagamento"))]
    pub valor: String,
    #[validate(custom(function = "data_pagamento"))]
    pub data: String,
    pub descricao: String,
}

impl FormularioEntidade for PagamentoForm {
    type Entidade = Pagamento;
    const PRIMEIRO_CAMPO: &'static str = "membro";

    // O modal já abre com a data de hoje
    fn inicial(hoje: NaiveDate) -> Self {
        Self {
            data: hoje.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    fn normalizar(&mut self) {
        aparar(&mut self.membro);
        aparar(&mut self.tipo);
        aparar(&mut self.valor);
        aparar(&mut self.data);
        aparar(&mut self.descricao);
    }

    fn para_entidade(
        &self,
        id: String,
        sessao: &Sessao,
        agora: DateTime<Utc>,
    ) -> Result<Pagamento, ValidationErrors> {
        let tipo = TipoPagamento::from_slug(&self.tipo)
            .ok_or_else(|| campo_invalido("tipo", "Selecione o tipo de pagamento."))?;
        let valor = parse_valor(&self.valor)
            .ok_or_else(|| campo_invalido("valor", "Informe um valor válido."))?;
        let data = parse_data(&self.data)
            .ok_or_else(|| campo_invalido("data", "Informe a data."))?;

        Ok(Pagamento {
            id,
            igreja_id: sessao.igreja_id.clone(),
            membro: self.membro.clone(),
            tipo,
            valor,
            data,
            descricao: self.descricao.clone(),
            criado_em: agora,
        })
    }
}

// =========================================================================
//  PEDIDO DE ORAÇÃO (membro)
// =========================================================================

fn texto_pedido(valor: &str) -> Result<(), ValidationError> {
    obrigatorio_com_minimo(valor, 1, "Escreva seu pedido de oração.", "")
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PedidoForm {
    #[validate(custom(function = "texto_pedido"))]
    pub pedido: String,
}

impl FormularioEntidade for PedidoForm {
    type Entidade = PedidoOracao;
    const PRIMEIRO_CAMPO: &'static str = "pedido";

    fn normalizar(&mut self) {
        aparar(&mut self.pedido);
    }

    fn para_entidade(
        &self,
        id: String,
        sessao: &Sessao,
        agora: DateTime<Utc>,
    ) -> Result<PedidoOracao, ValidationErrors> {
        Ok(PedidoOracao {
            id,
            igreja_id: sessao.igreja_id.clone(),
            membro_id: sessao.id.clone(),
            membro_nome: sessao.nome.clone(),
            pedido: self.pedido.clone(),
            status: StatusPedido::Pendente,
            criado_em: agora,
        })
    }
}

// =========================================================================
//  PERFIL (membro)
// =========================================================================

fn nome_perfil(valor: &str) -> Result<(), ValidationError> {
    obrigatorio_com_minimo(valor, 1, "Informe seu nome.", "")
}

pub(crate) fn email_obrigatorio(valor: &str) -> Result<(), ValidationError> {
    if valor.is_empty() {
        return Err(erro("required", "Informe seu e-mail."));
    }
    if !valor.validate_email() {
        return Err(erro("email", "Informe um e-mail válido."));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PerfilForm {
    #[validate(custom(function = "nome_perfil"))]
    pub nome: String,
    #[validate(custom(function = "email_obrigatorio"))]
    pub email: String,
}

impl PerfilForm {
    pub fn normalizar(&mut self) {
        aparar(&mut self.nome);
        aparar(&mut self.email);
    }
}
