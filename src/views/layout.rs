// src/views/layout.rs

use std::time::Instant;

use crate::{
    common::html::{escape_html, iniciais, primeiro_nome},
    models::{Papel, Sessao},
    services::toast::ToastNotifier,
};

// ============================================================================
// Estilo
// ============================================================================

pub const STYLE: &str = r#"
:root {
    --primaria: #4f46e5;
    --fundo: #f5f6fa;
    --texto: #1f2937;
    --suave: #6b7280;
    --borda: #e5e7eb;
    --sucesso: #059669;
    --erro: #dc2626;
    --alerta: #d97706;
}
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: -apple-system, "Segoe UI", Roboto, Arial, sans-serif; color: var(--texto); background: var(--fundo); display: flex; min-height: 100vh; }
body.modal-open { overflow: hidden; }
a { color: var(--primaria); text-decoration: none; }
.sidebar { width: 240px; background: #111827; color: #fff; padding: 1.5rem 1rem; display: flex; flex-direction: column; gap: .25rem; }
.sidebar a { color: #d1d5db; padding: .5rem .75rem; border-radius: 6px; }
.sidebar a.ativo, .sidebar a:hover { background: #1f2937; color: #fff; }
.sidebar .marca { font-weight: 700; margin-bottom: 1rem; }
.conteudo { flex: 1; padding: 2rem; }
.topo { display: flex; justify-content: space-between; align-items: center; margin-bottom: 1.5rem; }
.usuario { display: flex; gap: .5rem; align-items: center; }
.avatar { width: 36px; height: 36px; border-radius: 50%; background: var(--primaria); color: #fff; display: inline-flex; align-items: center; justify-content: center; font-size: .85rem; }
.botao { background: var(--primaria); color: #fff; border: 0; padding: .5rem 1rem; border-radius: 6px; cursor: pointer; font-size: .9rem; }
.botao.secundario { background: #fff; color: var(--texto); border: 1px solid var(--borda); }
.botao.perigo { background: var(--erro); }
.lista { display: flex; flex-direction: column; gap: .75rem; }
.item { background: #fff; border: 1px solid var(--borda); border-radius: 8px; padding: 1rem; display: flex; gap: 1rem; align-items: flex-start; }
.item .corpo { flex: 1; }
.badge { font-size: .75rem; padding: .1rem .5rem; border-radius: 999px; background: var(--borda); }
.badge.urgente, .badge.passado { background: #fee2e2; color: var(--erro); }
.badge.proximo, .badge.respondido { background: #d1fae5; color: var(--sucesso); }
.badge.pendente { background: #fef3c7; color: var(--alerta); }
.empty-state { text-align: center; padding: 3rem 1rem; color: var(--suave); }
.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 1rem; margin-bottom: 1.5rem; }
.card { background: #fff; border: 1px solid var(--borda); border-radius: 8px; padding: 1rem; }
.card strong { display: block; font-size: 1.4rem; }
.modal { position: fixed; inset: 0; background: rgba(0,0,0,.4); display: none; align-items: center; justify-content: center; }
.modal.aberto { display: flex; }
.modal .caixa { background: #fff; border-radius: 10px; padding: 1.5rem; width: min(480px, 92vw); }
.campo { display: flex; flex-direction: column; gap: .25rem; margin-bottom: .75rem; }
.campo input, .campo textarea, .campo select { padding: .5rem; border: 1px solid var(--borda); border-radius: 6px; font: inherit; }
.campo.invalido input, .campo.invalido textarea, .campo.invalido select { border-color: var(--erro); }
.erro-campo { color: var(--erro); font-size: .8rem; }
.abas { display: flex; gap: .5rem; margin-bottom: 1rem; }
.abas a { padding: .35rem .75rem; border-radius: 999px; border: 1px solid var(--borda); }
.abas a.ativa { background: var(--primaria); color: #fff; }
.toast { position: fixed; right: 1.5rem; bottom: 1.5rem; padding: .75rem 1rem; border-radius: 8px; color: #fff; background: #374151; }
.toast.toast-sucesso { background: var(--sucesso); }
.toast.toast-erro { background: var(--erro); }
.toast[hidden] { display: none; }
.item .ponto { width: 10px; height: 10px; border-radius: 50%; margin-top: .4rem; background: var(--primaria); }
.item .ponto-sucesso { background: var(--sucesso); }
.item .ponto-aviso { background: var(--alerta); }
.item .quando { color: var(--suave); }
.menu-toggle { display: none; font-size: 1.4rem; color: var(--texto); }
.overlay { display: none; }
@media (max-width: 768px) {
    .conteudo { padding: 1rem; }
    .menu-toggle { display: inline-block; }
    .sidebar { position: fixed; top: 0; bottom: 0; left: 0; z-index: 20; transform: translateX(-100%); transition: transform .2s; }
    .sidebar.aberta { transform: none; }
    .overlay.aberta { display: block; position: fixed; inset: 0; z-index: 10; background: rgba(0,0,0,.4); }
}
"#;

// Escape fecha o modal de maior prioridade (cada um sabe para onde voltar);
// sem modal aberto, recolhe a sidebar. O toast some sozinho.
// Os textos da cópia vêm do botão (`data-msg-*`).
pub const SCRIPT: &str = r#"
var menu = document.querySelector('.sidebar');
var fundo = document.querySelector('.overlay');
function menuAberto(aberto) {
    menu.classList.toggle('aberta', aberto);
    fundo.classList.toggle('aberta', aberto);
}
document.querySelectorAll('[data-abrir-menu]').forEach(function (el) {
    el.addEventListener('click', function (e) { e.preventDefault(); menuAberto(true); });
});
document.querySelectorAll('[data-fechar-menu]').forEach(function (el) {
    el.addEventListener('click', function (e) { e.preventDefault(); menuAberto(false); });
});
document.addEventListener('keydown', function (e) {
    if (e.key !== 'Escape') return;
    var abertos = Array.prototype.slice.call(document.querySelectorAll('.modal[aria-hidden="false"]'));
    abertos.sort(function (a, b) { return a.dataset.ordem - b.dataset.ordem; });
    if (abertos.length) { window.location.href = abertos[0].dataset.fechar; return; }
    if (menu && menu.classList.contains('aberta')) menuAberto(false);
});
var toast = document.querySelector('.toast[data-ocultar-em-ms]');
if (toast) setTimeout(function () { toast.hidden = true; }, Number(toast.dataset.ocultarEmMs));
var foco = document.querySelector('[data-foco]');
if (foco) foco.focus();
var copiar = document.querySelector('[data-copiar]');
if (copiar) copiar.addEventListener('click', function () {
    var codigo = copiar.dataset.copiar;
    function avisar(mensagem, classe) {
        var t = document.querySelector('.toast');
        t.textContent = mensagem;
        t.className = 'toast ' + classe;
        t.hidden = false;
        setTimeout(function () { t.hidden = true; }, Number(copiar.dataset.atrasoMs));
    }
    function legada() {
        var area = document.createElement('textarea');
        area.value = codigo;
        document.body.appendChild(area);
        area.select();
        var ok = false;
        try { ok = document.execCommand('copy'); } catch (e) { ok = false; }
        document.body.removeChild(area);
        return ok;
    }
    function concluir(ok) {
        if (ok) avisar(copiar.dataset.msgCopiado + codigo, 'toast-sucesso');
        else avisar(copiar.dataset.msgFalha + codigo, 'toast-erro');
    }
    if (navigator.clipboard && navigator.clipboard.writeText) {
        navigator.clipboard.writeText(codigo).then(function () { concluir(true); }, function () { concluir(legada()); });
    } else {
        concluir(legada());
    }
});
"#;

// ============================================================================
// Navegação
// ============================================================================

const MENU_IGREJA: [(&str, &str); 6] = [
    ("/igreja/painel", "Painel"),
    ("/igreja/comunicados", "Comunicados"),
    ("/igreja/eventos", "Eventos"),
    ("/igreja/pagamentos", "Pagamentos"),
    ("/igreja/pedidos-oracao", "Pedidos de Oração"),
    ("/igreja/fieis", "Fiéis"),
];

const MENU_MEMBRO: [(&str, &str); 6] = [
    ("/membros/painel", "Painel"),
    ("/membros/comunicados", "Comunicados"),
    ("/membros/eventos", "Eventos"),
    ("/membros/pagamentos", "Meus Pagamentos"),
    ("/membros/pedidos-oracao", "Pedidos de Oração"),
    ("/membros/perfil", "Meu Perfil"),
];

fn sidebar(sessao: &Sessao, ativo: &str, aberta: bool) -> String {
    let menu = match sessao.tipo {
        Papel::Igreja => &MENU_IGREJA,
        Papel::Membro => &MENU_MEMBRO,
    };
    let links: String = menu
        .iter()
        .map(|(href, rotulo)| {
            let classe = if *href == ativo { r#" class="ativo""# } else { "" };
            format!(r#"<a href="{href}"{classe}>{rotulo}</a>"#)
        })
        .collect();

    // Sem JS, o overlay volta para a página sem `?menu`
    format!(
        r#"<nav class="sidebar{aberta}">
    <div class="marca">⛪ {igreja}</div>
    {links}
    <form method="post" action="/sair"><button class="botao secundario" type="submit">Sair</button></form>
</nav>
<a class="overlay{aberta}" href="{ativo}" data-fechar-menu aria-label="Fechar menu"></a>"#,
        aberta = if aberta { " aberta" } else { "" },
        igreja = escape_html(&sessao.nome_igreja),
    )
}

/// O toast visível em `agora`, com o tempo restante para o script escondê-lo.
pub fn toast_html(toast: &ToastNotifier, agora: Instant) -> String {
    match (toast.visivel(agora), toast.restante(agora)) {
        (Some(t), Some(restante)) => format!(
            r#"<div class="toast {classe}" role="status" data-ocultar-em-ms="{ms}">{mensagem}</div>"#,
            classe = t.tipo.classe(),
            ms = restante.as_millis(),
            mensagem = escape_html(&t.mensagem),
        ),
        _ => r#"<div class="toast" role="status" hidden></div>"#.to_string(),
    }
}

/// Casca das páginas autenticadas.
pub struct Layout<'a> {
    pub titulo: &'a str,
    pub sessao: &'a Sessao,
    pub ativo: &'a str,
    pub rolagem_travada: bool,
    // Sidebar aberta (telas estreitas)
    pub menu_aberto: bool,
}

impl Layout<'_> {
    pub fn render(&self, conteudo: &str, toast: &str) -> String {
        base_html(
            self.titulo,
            &format!(
                r#"{sidebar}
<main class="conteudo">
    <header class="topo">
        <a class="menu-toggle" href="{ativo}?menu=1" data-abrir-menu aria-label="Abrir menu">☰</a>
        <h1>{titulo}</h1>
        <div class="usuario"><span>Olá, {nome}</span><span class="avatar">{iniciais}</span></div>
    </header>
    {conteudo}
</main>
{toast}"#,
                sidebar = sidebar(self.sessao, self.ativo, self.menu_aberto),
                ativo = self.ativo,
                titulo = escape_html(self.titulo),
                nome = escape_html(primeiro_nome(&self.sessao.nome)),
                iniciais = escape_html(&iniciais(&self.sessao.nome)),
            ),
            self.rolagem_travada,
        )
    }
}

pub fn base_html(titulo: &str, corpo: &str, rolagem_travada: bool) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{titulo} · Congrega Fiel</title>
    <style>{STYLE}</style>
</head>
<body{classe}>
{corpo}
<script>{SCRIPT}</script>
</body>
</html>"#,
        titulo = escape_html(titulo),
        classe = if rolagem_travada { r#" class="modal-open""# } else { "" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;
    use std::time::Duration;

    fn sessao() -> Sessao {
        Sessao {
            id: None,
            igreja_id: "igr_1".into(),
            tipo: Papel::Igreja,
            nome: "João <b>Pedro</b>".into(),
            nome_igreja: "Igreja & Cia".into(),
            email: None,
            codigo_igreja: None,
            logado_em: None,
            extras: Map::new(),
        }
    }

    #[test]
    fn layout_escapa_e_marca_o_menu_ativo() {
        let html = Layout {
            titulo: "Eventos",
            sessao: &sessao(),
            ativo: "/igreja/eventos",
            rolagem_travada: true,
            menu_aberto: false,
        }
        .render("<p>ok</p>", "");

        assert!(html.contains("Igreja &amp; Cia"));
        assert!(html.contains(r#"<a href="/igreja/eventos" class="ativo">Eventos</a>"#));
        assert!(html.contains(r#"<body class="modal-open">"#));
        assert!(!html.contains("<b>Pedro</b>"));
        assert!(!html.contains("/membros/perfil"));
        assert!(html.contains(r#"<nav class="sidebar">"#));
    }

    #[test]
    fn menu_abre_pelo_botao_e_fecha_pelo_overlay() {
        let layout = |menu_aberto| Layout {
            titulo: "Eventos",
            sessao: &sessao(),
            ativo: "/igreja/eventos",
            rolagem_travada: false,
            menu_aberto,
        }
        .render("", "");

        let fechado = layout(false);
        assert!(fechado.contains(r#"href="/igreja/eventos?menu=1" data-abrir-menu"#));
        assert!(fechado.contains(r#"<a class="overlay" href="/igreja/eventos" data-fechar-menu"#));
        assert!(SCRIPT.contains("[data-abrir-menu]"));

        let aberto = layout(true);
        assert!(aberto.contains(r#"<nav class="sidebar aberta">"#));
        assert!(aberto.contains(r#"<a class="overlay aberta""#));
    }

    #[test]
    fn toast_leva_o_tempo_restante() {
        let inicio = Instant::now();
        let mut toast = ToastNotifier::new(Duration::from_millis(3000));
        toast.sucesso("Salvo <já>", inicio);

        let html = toast_html(&toast, inicio + Duration::from_millis(1000));
        assert!(html.contains(r#"data-ocultar-em-ms="2000""#));
        assert!(html.contains("toast-sucesso"));
        assert!(html.contains("Salvo &lt;já&gt;"));

        let escondido = toast_html(&toast, inicio + Duration::from_millis(3000));
        assert!(escondido.contains("hidden"));
    }
}
