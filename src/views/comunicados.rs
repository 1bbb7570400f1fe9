// src/views/comunicados.rs

use chrono::{Local, NaiveDate};

use crate::{
    common::{formato::formatar_data_hora, html::escape_html},
    models::{Comunicado, Prioridade},
    services::formularios::{ComunicadoForm, ErrosFormulario},
    views::{
        crud::{campo_input, campo_select, campo_textarea, VisaoCrud},
        lista::{EstadoVazio, ItemLista},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct ComunicadoVm {
    pub id: String,
    pub titulo: String,
    pub conteudo: String,
    pub prioridade: &'static str,
    pub classe_prioridade: &'static str,
    pub urgente: bool,
    pub publicado_em: String,
}

impl ItemLista for ComunicadoVm {
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn to_view_model(c: &Comunicado) -> ComunicadoVm {
    ComunicadoVm {
        id: c.id.clone(),
        titulo: c.titulo.clone(),
        conteudo: c.conteudo.clone(),
        prioridade: c.prioridade.rotulo(),
        classe_prioridade: c.prioridade.slug(),
        urgente: c.prioridade == Prioridade::Urgente,
        publicado_em: formatar_data_hora(c.criado_em.with_timezone(&Local).naive_local()),
    }
}

pub fn item(vm: &ComunicadoVm) -> String {
    format!(
        r#"<div class="corpo">
    <h3>{titulo} <span class="badge {classe}">{prioridade}</span></h3>
    <p>{conteudo}</p>
    <small>Publicado em {data}</small>
</div>"#,
        titulo = escape_html(&vm.titulo),
        classe = vm.classe_prioridade,
        prioridade = vm.prioridade,
        conteudo = escape_html(&vm.conteudo),
        data = vm.publicado_em,
    )
}

pub fn vazio() -> EstadoVazio {
    EstadoVazio::new(
        "Nenhum comunicado",
        "Os avisos publicados pela igreja aparecem aqui.",
    )
}

impl VisaoCrud for ComunicadoForm {
    type Vm = ComunicadoVm;

    const CONTAINER: &'static str = "lista-comunicados";
    const ROTULO_NOVO: &'static str = "Novo comunicado";

    fn to_view_model(entidade: &Comunicado, _hoje: NaiveDate) -> ComunicadoVm {
        to_view_model(entidade)
    }

    fn item(vm: &ComunicadoVm) -> String {
        item(vm)
    }

    fn campos(&self, erros: &ErrosFormulario, foco: Option<&str>) -> String {
        [
            campo_input("titulo", "Título", "text", &self.titulo, erros, foco),
            campo_textarea("conteudo", "Mensagem", &self.conteudo, erros, foco),
            campo_select(
                "prioridade",
                "Prioridade",
                &[
                    (Prioridade::Normal.slug(), Prioridade::Normal.rotulo()),
                    (Prioridade::Urgente.slug(), Prioridade::Urgente.rotulo()),
                ],
                &self.prioridade,
                erros,
            ),
        ]
        .concat()
    }

    fn vazio() -> EstadoVazio {
        vazio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn titulo_com_script_vira_texto() {
        let c = Comunicado {
            id: "com_1".into(),
            igreja_id: "igr_1".into(),
            titulo: "<script>alert('x')</script>".into(),
            conteudo: "Culto & ceia".into(),
            prioridade: Prioridade::Urgente,
            criado_em: Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap(),
        };

        let vm = to_view_model(&c);
        assert!(vm.urgente);
        assert_eq!(vm.prioridade, "Urgente");

        let html = item(&vm);
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("Culto &amp; ceia"));
        assert!(!html.contains("<script>"));
    }
}
