// src/views/pagamentos.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    common::{
        formato::{formatar_brl, formatar_data, plural},
        html::escape_html,
    },
    models::{Pagamento, ResumoPagamentos, TipoPagamento},
    services::{
        formularios::{ErrosFormulario, PagamentoForm},
        painel_service::resumo_do_mes,
    },
    views::{
        crud::{campo_input, campo_select, VisaoCrud},
        lista::{EstadoVazio, ItemLista},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct PagamentoVm {
    pub id: String,
    pub membro: String,
    pub tipo: &'static str,
    pub classe_tipo: &'static str,
    pub valor: String,
    pub data: String,
    pub descricao: String,
}

impl ItemLista for PagamentoVm {
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn to_view_model(p: &Pagamento) -> PagamentoVm {
    PagamentoVm {
        id: p.id.clone(),
        membro: p.membro.clone(),
        tipo: p.tipo.rotulo(),
        classe_tipo: p.tipo.slug(),
        valor: formatar_brl(p.valor),
        data: formatar_data(p.data),
        descricao: p.descricao.clone(),
    }
}

pub fn item(vm: &PagamentoVm) -> String {
    let descricao = if vm.descricao.is_empty() {
        String::new()
    } else {
        format!(" · {}", escape_html(&vm.descricao))
    };

    format!(
        r#"<div class="corpo">
    <h3>{membro} <span class="badge {classe}">{tipo}</span></h3>
    <small>{data}{descricao}</small>
</div>
<strong class="valor">{valor}</strong>"#,
        membro = escape_html(&vm.membro),
        classe = vm.classe_tipo,
        tipo = vm.tipo,
        data = vm.data,
        valor = vm.valor,
    )
}

/// "1 registro" / "N registros"
pub fn rotulo_registros(n: usize) -> String {
    plural(n, "registro", "registros")
}

pub fn resumo_html(resumo: &ResumoPagamentos, registros: usize) -> String {
    format!(
        r#"<div class="cards">
    <div class="card"><span>Total do mês</span><strong>{total}</strong></div>
    <div class="card"><span>Dízimos</span><strong>{dizimos}</strong></div>
    <div class="card"><span>Ofertas</span><strong>{ofertas}</strong></div>
    <div class="card"><span>Outros</span><strong>{outros}</strong></div>
</div>
<p class="contagem">{registros}</p>"#,
        total = formatar_brl(resumo.total),
        dizimos = formatar_brl(resumo.dizimos),
        ofertas = formatar_brl(resumo.ofertas),
        outros = formatar_brl(resumo.outros),
        registros = rotulo_registros(registros),
    )
}

/// Cabeçalho da página "Meus pagamentos" do membro.
pub fn total_membro_html(total: Decimal, registros: usize) -> String {
    format!(
        r#"<div class="cards"><div class="card"><span>Total contribuído</span><strong>{}</strong></div></div>
<p class="contagem">{}</p>"#,
        formatar_brl(total),
        rotulo_registros(registros),
    )
}

pub fn vazio() -> EstadoVazio {
    EstadoVazio::new("Nenhum pagamento", "Dízimos e ofertas registrados aparecem aqui.")
}

impl VisaoCrud for PagamentoForm {
    type Vm = PagamentoVm;

    const CONTAINER: &'static str = "lista-pagamentos";
    const ROTULO_NOVO: &'static str = "Novo pagamento";

    fn to_view_model(entidade: &Pagamento, _hoje: NaiveDate) -> PagamentoVm {
        to_view_model(entidade)
    }

    fn item(vm: &PagamentoVm) -> String {
        item(vm)
    }

    fn campos(&self, erros: &ErrosFormulario, foco: Option<&str>) -> String {
        let mut tipos = vec![("", "Selecione...")];
        tipos.extend(TipoPagamento::TODOS.iter().map(|t| (t.slug(), t.rotulo())));

        [
            campo_input("membro", "Membro", "text", &self.membro, erros, foco),
            campo_select("tipo", "Tipo", &tipos, &self.tipo, erros),
            campo_input("valor", "Valor (R$)", "text", &self.valor, erros, foco),
            campo_input("data", "Data", "date", &self.data, erros, foco),
            campo_input("descricao", "Descrição", "text", &self.descricao, erros, foco),
        ]
        .concat()
    }

    fn vazio() -> EstadoVazio {
        vazio()
    }

    fn resumo(itens: &[Pagamento], hoje: NaiveDate) -> String {
        resumo_html(&resumo_do_mes(itens, hoje), itens.len())
    }
}
