// src/views/eventos.rs

use chrono::{Datelike, NaiveDate};

use crate::{
    common::{
        formato::{formatar_data, mes_abreviado},
        html::escape_html,
    },
    models::Evento,
    services::formularios::{ErrosFormulario, EventoForm},
    views::{
        crud::{campo_input, campo_textarea, VisaoCrud},
        lista::{EstadoVazio, ItemLista},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct EventoVm {
    pub id: String,
    pub titulo: String,
    pub descricao: String,
    pub dia: String,
    pub mes: &'static str,
    pub data: String,
    pub hora: String,
    pub local: String,
    pub proximo: bool,
    pub badge: &'static str,
}

impl ItemLista for EventoVm {
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn to_view_model(e: &Evento, hoje: NaiveDate) -> EventoVm {
    let proximo = e.eh_proximo(hoje);
    EventoVm {
        id: e.id.clone(),
        titulo: e.titulo.clone(),
        descricao: e.descricao.clone(),
        dia: format!("{:02}", e.data.day()),
        mes: mes_abreviado(e.data),
        data: formatar_data(e.data),
        hora: e.hora.clone(),
        local: e.local.clone(),
        proximo,
        badge: if proximo { "Próximo" } else { "Passado" },
    }
}

pub fn item(vm: &EventoVm) -> String {
    let descricao = if vm.descricao.is_empty() {
        String::new()
    } else {
        format!("<p>{}</p>", escape_html(&vm.descricao))
    };

    format!(
        r#"<div class="data-evento"><strong>{dia}</strong><span>{mes}</span></div>
<div class="corpo">
    <h3>{titulo} <span class="badge {classe}">{badge}</span></h3>
    {descricao}
    <small>{data} às {hora} · {local}</small>
</div>"#,
        dia = vm.dia,
        mes = vm.mes,
        titulo = escape_html(&vm.titulo),
        classe = if vm.proximo { "proximo" } else { "passado" },
        badge = vm.badge,
        data = vm.data,
        hora = escape_html(&vm.hora),
        local = escape_html(&vm.local),
    )
}

pub fn vazio() -> EstadoVazio {
    EstadoVazio::new("Nenhum evento", "Cultos, reuniões e encontros aparecem aqui.")
}

impl VisaoCrud for EventoForm {
    type Vm = EventoVm;

    const CONTAINER: &'static str = "lista-eventos";
    const ROTULO_NOVO: &'static str = "Novo evento";

    fn to_view_model(entidade: &Evento, hoje: NaiveDate) -> EventoVm {
        to_view_model(entidade, hoje)
    }

    fn item(vm: &EventoVm) -> String {
        item(vm)
    }

    fn campos(&self, erros: &ErrosFormulario, foco: Option<&str>) -> String {
        [
            campo_input("titulo", "Título", "text", &self.titulo, erros, foco),
            campo_textarea("descricao", "Descrição", &self.descricao, erros, foco),
            campo_input("data", "Data", "date", &self.data, erros, foco),
            campo_input("hora", "Horário", "time", &self.hora, erros, foco),
            campo_input("local", "Local", "text", &self.local, erros, foco),
        ]
        .concat()
    }

    fn vazio() -> EstadoVazio {
        vazio()
    }
}
