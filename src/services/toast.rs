// src/services/toast.rs

use std::time::{Duration, Instant};

pub const ATRASO_PADRAO: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoToast {
    Sucesso,
    Erro,
    Neutro,
}

impl TipoToast {
    /// Classe CSS do toast.
    pub fn classe(self) -> &'static str {
        match self {
            TipoToast::Sucesso => "toast-sucesso",
            TipoToast::Erro => "toast-erro",
            TipoToast::Neutro => "toast-neutro",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub mensagem: String,
    pub tipo: TipoToast,
    pub ocultar_em: Instant,
}

/// Um único toast por página. Mostrar outro substitui o atual e reinicia o prazo.
#[derive(Debug, Clone)]
pub struct ToastNotifier {
    atraso: Duration,
    atual: Option<Toast>,
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new(ATRASO_PADRAO)
    }
}

impl ToastNotifier {
    pub fn new(atraso: Duration) -> Self {
        Self { atraso, atual: None }
    }

    pub fn atraso(&self) -> Duration {
        self.atraso
    }

    pub fn show(&mut self, mensagem: impl Into<String>, tipo: TipoToast, agora: Instant) -> &Toast {
        self.atual.insert(Toast {
            mensagem: mensagem.into(),
            tipo,
            ocultar_em: agora + self.atraso,
        })
    }

    pub fn sucesso(&mut self, mensagem: impl Into<String>, agora: Instant) -> &Toast {
        self.show(mensagem, TipoToast::Sucesso, agora)
    }

    pub fn erro(&mut self, mensagem: impl Into<String>, agora: Instant) -> &Toast {
        self.show(mensagem, TipoToast::Erro, agora)
    }

    /// O toast ainda na tela em `agora`, se houver.
    pub fn visivel(&self, agora: Instant) -> Option<&Toast> {
        self.atual.as_ref().filter(|t| agora < t.ocultar_em)
    }

    /// Quanto falta para esconder o toast visível.
    pub fn restante(&self, agora: Instant) -> Option<Duration> {
        self.visivel(agora).map(|t| t.ocultar_em - agora)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn esconde_depois_do_atraso() {
        let inicio = Instant::now();
        let mut toast = ToastNotifier::default();
        toast.sucesso("Comunicado publicado!", inicio);

        let quase = inicio + Duration::from_millis(2999);
        assert_eq!(toast.visivel(quase).unwrap().mensagem, "Comunicado publicado!");
        assert_eq!(toast.restante(quase), Some(Duration::from_millis(1)));
        assert!(toast.visivel(inicio + ATRASO_PADRAO).is_none());
    }

    #[test]
    fn novo_toast_substitui_e_reinicia_o_prazo() {
        let inicio = Instant::now();
        let mut toast = ToastNotifier::new(Duration::from_millis(3000));
        toast.sucesso("primeiro", inicio);

        let depois = inicio + Duration::from_millis(2000);
        toast.erro("segundo", depois);

        // 1s depois do prazo do primeiro o segundo ainda aparece
        let visivel = toast.visivel(inicio + Duration::from_millis(4000)).unwrap();
        assert_eq!(visivel.mensagem, "segundo");
        assert_eq!(visivel.tipo, TipoToast::Erro);
        assert!(toast.visivel(depois + Duration::from_millis(3000)).is_none());
    }

    #[test]
    fn sem_toast_nada_visivel() {
        let toast = ToastNotifier::default();
        assert!(toast.visivel(Instant::now()).is_none());
        assert_eq!(TipoToast::Neutro.classe(), "toast-neutro");
    }
}
