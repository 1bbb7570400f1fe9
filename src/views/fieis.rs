// src/views/fieis.rs

use chrono::Local;

use crate::{
    common::{
        formato::formatar_data,
        html::{escape_html, iniciais},
        relogio::Momento,
    },
    models::{Membro, Sessao},
    services::{
        area_transferencia::{MSG_COPIADO, MSG_FALHA, MSG_SEM_CODIGO},
        membros_service::buscar,
        toast::ToastNotifier,
    },
    views::{
        layout::{toast_html, Layout},
        lista::{EstadoVazio, ItemLista, ListRenderer},
    },
};

pub const CAMINHO: &str = "/igreja/fieis";

#[derive(Debug, Clone, PartialEq)]
pub struct MembroVm {
    pub id: String,
    pub nome: String,
    pub email: String,
    pub iniciais: String,
    pub desde: Option<String>,
}

impl ItemLista for MembroVm {
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn to_view_model(m: &Membro) -> MembroVm {
    MembroVm {
        id: m.id.clone(),
        nome: m.nome_completo.clone(),
        email: m.email.clone(),
        iniciais: iniciais(&m.nome_completo),
        desde: m
            .criado_em
            .map(|c| formatar_data(c.with_timezone(&Local).date_naive())),
    }
}

pub fn item(vm: &MembroVm) -> String {
    let desde = vm
        .desde
        .as_deref()
        .map(|d| format!(" · membro desde {}", d))
        .unwrap_or_default();
    format!(
        r#"<span class="avatar">{iniciais}</span>
<div class="corpo"><h3>{nome}</h3><small>{email}{desde}</small></div>"#,
        iniciais = escape_html(&vm.iniciais),
        nome = escape_html(&vm.nome),
        email = escape_html(&vm.email),
    )
}

/// "Nenhum membro cadastrado ainda" / "1 membro cadastrado" / "N membros cadastrados"
pub fn rotulo_total(n: usize) -> String {
    match n {
        0 => "Nenhum membro cadastrado ainda".to_string(),
        1 => "1 membro cadastrado".to_string(),
        n => format!("{} membros cadastrados", n),
    }
}

/// `N resultado(s) para "q"` / `Nenhum resultado para "q"`
pub fn rotulo_busca(n: usize, consulta: &str) -> String {
    match n {
        0 => format!("Nenhum resultado para \"{}\"", consulta),
        1 => format!("1 resultado para \"{}\"", consulta),
        n => format!("{} resultados para \"{}\"", n, consulta),
    }
}

// O botão copia no navegador com as mesmas regras e textos de `copiar_codigo`.
fn cartao_codigo(codigo: Option<&str>, atraso_ms: u128) -> String {
    match codigo.filter(|c| !c.is_empty()) {
        Some(codigo) => format!(
            r#"<div class="card codigo">
    <span>Código da igreja</span>
    <strong id="codigo-igreja">{codigo}</strong>
    <button class="botao secundario" type="button" data-copiar="{codigo}" data-atraso-ms="{atraso_ms}" data-msg-copiado="{copiado}" data-msg-falha="{falha}">Copiar</button>
    <small>Compartilhe com os membros para que entrem na igreja.</small>
</div>"#,
            codigo = escape_html(codigo),
            copiado = escape_html(MSG_COPIADO),
            falha = escape_html(MSG_FALHA),
        ),
        None => format!(
            r#"<div class="card codigo"><span>{}</span></div>"#,
            escape_html(MSG_SEM_CODIGO)
        ),
    }
}

/// Rol de membros com busca por nome ou e-mail.
pub fn pagina(
    membros: &[Membro],
    consulta: &str,
    sessao: &Sessao,
    toast: &ToastNotifier,
    momento: &Momento,
) -> String {
    let consulta = consulta.trim();
    let buscando = !consulta.is_empty();

    let encontrados = buscar(membros, consulta);
    let vms: Vec<MembroVm> = encontrados.iter().map(to_view_model).collect();

    let (rotulo, vazio) = if buscando {
        (
            rotulo_busca(vms.len(), consulta),
            EstadoVazio::new(
                "Nenhum resultado encontrado",
                "Tente buscar por outro nome ou e-mail.",
            ),
        )
    } else {
        (
            rotulo_total(membros.len()),
            EstadoVazio::new(
                "Nenhum membro ainda",
                "Compartilhe o código da igreja para os membros se cadastrarem.",
            ),
        )
    };

    let conteudo = format!(
        r#"{codigo}
<form class="busca" method="get" action="{CAMINHO}">
    <input type="search" name="q" value="{consulta}" placeholder="Buscar por nome ou e-mail">
</form>
<p class="contagem">{rotulo}</p>
{lista}"#,
        codigo = cartao_codigo(sessao.codigo_igreja.as_deref(), toast.atraso().as_millis()),
        consulta = escape_html(consulta),
        rotulo = escape_html(&rotulo),
        lista = ListRenderer::new("lista-fieis").render(&vms, item, &vazio),
    );

    Layout {
        titulo: "Fiéis",
        sessao,
        ativo: CAMINHO,
        rolagem_travada: false,
        menu_aberto: false,
    }
    .render(&conteudo, &toast_html(toast, momento.instante))
}
