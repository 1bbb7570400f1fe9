// src/views/lista.rs

use crate::common::html::escape_html;

/// Um item de lista sabe o próprio id (vai no `data-id` para as ações).
pub trait ItemLista {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq)]
pub struct EstadoVazio {
    pub titulo: String,
    pub mensagem: String,
}

impl EstadoVazio {
    pub fn new(titulo: impl Into<String>, mensagem: impl Into<String>) -> Self {
        Self {
            titulo: titulo.into(),
            mensagem: mensagem.into(),
        }
    }
}

/// Renderiza a lista ou, sem itens, esconde o container e mostra o estado vazio.
#[derive(Debug, Clone, Copy)]
pub struct ListRenderer<'a> {
    pub container_id: &'a str,
}

impl<'a> ListRenderer<'a> {
    pub fn new(container_id: &'a str) -> Self {
        Self { container_id }
    }

    /// `template` recebe o view model e devolve o miolo do item, já escapado.
    pub fn render<V, F>(&self, itens: &[V], template: F, vazio: &EstadoVazio) -> String
    where
        V: ItemLista,
        F: Fn(&V) -> String,
    {
        let vazia = itens.is_empty();
        let html_itens: String = itens
            .iter()
            .map(|item| {
                format!(
                    r#"<article class="item" data-id="{id}">{miolo}</article>"#,
                    id = escape_html(item.id()),
                    miolo = template(item),
                )
            })
            .collect();

        format!(
            r#"<section id="{id}" class="lista"{lista_oculta}>{html_itens}</section>
<div class="empty-state"{vazio_oculto}><h3>{titulo}</h3><p>{mensagem}</p></div>"#,
            id = self.container_id,
            lista_oculta = if vazia { " hidden" } else { "" },
            vazio_oculto = if vazia { "" } else { " hidden" },
            titulo = escape_html(&vazio.titulo),
            mensagem = escape_html(&vazio.mensagem),
        )
    }
}
