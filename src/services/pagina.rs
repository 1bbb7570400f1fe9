// src/services/pagina.rs

use std::{sync::Arc, time::Duration};

use crate::{
    common::{id::gerar_id_unico, relogio::Momento},
    db::{LocalStorage, Repository},
    models::{Entidade, Papel, Sessao},
    services::{
        formularios::{ErrosFormulario, FormularioEntidade},
        modal::{Modal, ModaisPagina},
        toast::ToastNotifier,
    },
};

pub const MSG_FALHA_GRAVACAO: &str = "Não foi possível salvar. Tente novamente.";

/// O que muda de uma página de CRUD para outra.
#[derive(Debug, Clone, Copy)]
pub struct ConfigPagina {
    pub papel: Papel,
    pub caminho: &'static str,
    pub titulo: &'static str,
    pub msg_criado: &'static str,
    pub msg_excluido: &'static str,
}

/// Tudo o que a página mostra depois de uma ação.
pub struct EstadoPagina<F: FormularioEntidade> {
    pub itens: Vec<F::Entidade>,
    pub modais: ModaisPagina<F>,
    pub toast: ToastNotifier,
}

/// Controlador genérico: carrega, cria e exclui registros da igreja da sessão.
pub struct PaginaCrud<F: FormularioEntidade> {
    config: ConfigPagina,
    repo: Repository<F::Entidade>,
    atraso_toast: Duration,
}

impl<F: FormularioEntidade> Clone for PaginaCrud<F> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            repo: self.repo.clone(),
            atraso_toast: self.atraso_toast,
        }
    }
}

impl<F: FormularioEntidade> PaginaCrud<F> {
    pub fn new(config: ConfigPagina, storage: Arc<dyn LocalStorage>, atraso_toast: Duration) -> Self {
        Self {
            config,
            repo: Repository::new(storage),
            atraso_toast,
        }
    }

    pub fn config(&self) -> &ConfigPagina {
        &self.config
    }

    pub fn repo(&self) -> &Repository<F::Entidade> {
        &self.repo
    }

    /// Carga da página: registros da igreja, modais fechados, sem toast.
    pub fn abrir(&self, sessao: &Sessao, momento: &Momento) -> EstadoPagina<F> {
        EstadoPagina {
            itens: self.repo.load_for_tenant(&sessao.igreja_id, momento.hoje),
            modais: ModaisPagina::default(),
            toast: ToastNotifier::new(self.atraso_toast),
        }
    }

    pub fn abrir_criacao(&self, estado: &mut EstadoPagina<F>, momento: &Momento) {
        estado.modais.criacao.open(F::inicial(momento.hoje));
    }

    /// Valida e grava. Com erro, nada é gravado e o modal continua aberto.
    pub fn submeter(
        &self,
        estado: &mut EstadoPagina<F>,
        sessao: &Sessao,
        mut form: F,
        momento: &Momento,
    ) {
        let id = gerar_id_unico(F::Entidade::PREFIXO_ID, momento.agora, |id| {
            self.repo.contains_id(id)
        });

        let entidade = match form.validar(id, sessao, momento.agora) {
            Ok(entidade) => entidade,
            Err(errors) => {
                tracing::debug!("Formulário de {} inválido", self.config.caminho);
                estado.modais.criacao.mostrar_erros(form, ErrosFormulario::from(&errors));
                return;
            }
        };

        if let Err(e) = self.repo.create(&entidade) {
            tracing::error!("Falha ao gravar em {}: {}", F::Entidade::STORAGE_KEY, e);
            estado.modais.criacao.mostrar_erros(form, ErrosFormulario::default());
            estado.toast.erro(MSG_FALHA_GRAVACAO, momento.instante);
            return;
        }

        estado.modais.criacao.close();
        estado.itens = self.repo.load_for_tenant(&sessao.igreja_id, momento.hoje);
        estado.toast.sucesso(self.config.msg_criado, momento.instante);
    }

    pub fn solicitar_exclusao(&self, estado: &mut EstadoPagina<F>, id: &str) {
        if id.trim().is_empty() {
            return;
        }
        estado.modais.confirmacao.open(id.trim());
    }

    pub fn cancelar_exclusao(&self, estado: &mut EstadoPagina<F>) {
        estado.modais.confirmacao.close();
    }

    /// Exclui o alvo pendente. Sem alvo, ou alvo de outra igreja, nada acontece.
    pub fn confirmar_exclusao(
        &self,
        estado: &mut EstadoPagina<F>,
        sessao: &Sessao,
        momento: &Momento,
    ) {
        if !estado.modais.confirmacao.aberto() {
            return;
        }
        let Some(id) = estado.modais.confirmacao.alvo().map(str::to_string) else {
            return;
        };
        estado.modais.confirmacao.close();

        let pertence = self
            .repo
            .find_by_id(&id)
            .is_some_and(|e| e.igreja_id() == sessao.igreja_id);
        if !pertence {
            tracing::debug!("Exclusão ignorada: {} não é da igreja {}", id, sessao.igreja_id);
            return;
        }

        match self.repo.delete_by_id(&id) {
            Ok(true) => {
                estado.itens = self.repo.load_for_tenant(&sessao.igreja_id, momento.hoje);
                estado.toast.sucesso(self.config.msg_excluido, momento.instante);
            }
            Ok(false) => {}
            Err(e) => {
                tracing::error!("Falha ao excluir {}: {}", id, e);
                estado.toast.erro(MSG_FALHA_GRAVACAO, momento.instante);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::AppError;
    use crate::db::MemoryStorage;
    use crate::models::{Comunicado, Evento};
    use crate::services::formularios::{ComunicadoForm, EventoForm};
    use crate::services::toast::TipoToast;
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::Map;

    const CONFIG: ConfigPagina = ConfigPagina {
        papel: Papel::Igreja,
        caminho: "/igreja/eventos",
        titulo: "Eventos",
        msg_criado: "Evento criado!",
        msg_excluido: "Evento excluído.",
    };

    fn sessao(igreja: &str) -> Sessao {
        Sessao {
            id: None,
            igreja_id: igreja.into(),
            tipo: Papel::Igreja,
            nome: "Pastor".into(),
            nome_igreja: "Central".into(),
            email: None,
            codigo_igreja: None,
            logado_em: None,
            extras: Map::new(),
        }
    }

    fn momento() -> Momento {
        Momento::em(
            Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        )
    }

    fn form_evento(titulo: &str, data: &str) -> EventoForm {
        EventoForm {
            titulo: titulo.into(),
            descricao: String::new(),
            data: data.into(),
            hora: "19:00".into(),
            local: "Templo".into(),
        }
    }

    fn pagina(storage: Arc<dyn LocalStorage>) -> PaginaCrud<EventoForm> {
        PaginaCrud::new(CONFIG, storage, Duration::from_millis(3000))
    }

    #[test]
    fn criar_grava_fecha_o_modal_e_avisa() {
        let pagina = pagina(Arc::new(MemoryStorage::new()));
        let sessao = sessao("igr_1");
        let m = momento();

        let mut estado = pagina.abrir(&sessao, &m);
        pagina.abrir_criacao(&mut estado, &m);
        pagina.submeter(&mut estado, &sessao, form_evento("Culto", "2026-10-18"), &m);

        assert_eq!(estado.itens.len(), 1);
        assert!(estado.itens[0].id.starts_with("evt_"));
        assert!(!estado.modais.criacao.aberto());
        let toast = estado.toast.visivel(m.instante).unwrap();
        assert_eq!(toast.mensagem, "Evento criado!");
        assert_eq!(toast.tipo, TipoToast::Sucesso);
    }

    #[test]
    fn form_invalido_nao_grava_nada() {
        let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::new());
        let pagina = pagina(storage.clone());
        let sessao = sessao("igr_1");
        let m = momento();

        let mut estado = pagina.abrir(&sessao, &m);
        pagina.submeter(&mut estado, &sessao, form_evento("Oi", ""), &m);

        assert!(estado.itens.is_empty());
        assert!(estado.modais.criacao.aberto());
        assert_eq!(estado.modais.criacao.erros.len(), 2);
        assert_eq!(estado.modais.criacao.form.titulo, "Oi");
        assert!(estado.toast.visivel(m.instante).is_none());
        assert_eq!(storage.get_item(Evento::STORAGE_KEY), None);
    }

    #[test]
    fn confirmar_sem_alvo_e_ignorado() {
        let pagina = pagina(Arc::new(MemoryStorage::new()));
        let sessao = sessao("igr_1");
        let m = momento();
        let mut estado = pagina.abrir(&sessao, &m);
        pagina.submeter(&mut estado, &sessao, form_evento("Culto", "2026-10-18"), &m);

        let mut novo = pagina.abrir(&sessao, &m);
        pagina.confirmar_exclusao(&mut novo, &sessao, &m);
        assert_eq!(novo.itens.len(), 1);
        assert!(novo.toast.visivel(m.instante).is_none());

        pagina.solicitar_exclusao(&mut novo, "   ");
        assert!(!novo.modais.confirmacao.aberto());
    }

    #[test]
    fn excluir_respeita_a_igreja_da_sessao() {
        let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::new());
        let pagina = pagina(storage);
        let m = momento();
        let dona = sessao("igr_1");
        let outra = sessao("igr_2");

        let mut estado = pagina.abrir(&dona, &m);
        pagina.submeter(&mut estado, &dona, form_evento("Culto", "2026-10-18"), &m);
        let id = estado.itens[0].id.clone();

        let mut intrusa = pagina.abrir(&outra, &m);
        pagina.solicitar_exclusao(&mut intrusa, &id);
        pagina.confirmar_exclusao(&mut intrusa, &outra, &m);
        assert!(pagina.repo().contains_id(&id));
        assert!(!intrusa.modais.confirmacao.aberto());

        let mut estado = pagina.abrir(&dona, &m);
        pagina.solicitar_exclusao(&mut estado, &id);
        pagina.confirmar_exclusao(&mut estado, &dona, &m);
        assert!(estado.itens.is_empty());
        assert_eq!(estado.toast.visivel(m.instante).unwrap().mensagem, "Evento excluído.");
    }

    #[test]
    fn cancelar_descarta_o_alvo() {
        let pagina = pagina(Arc::new(MemoryStorage::new()));
        let sessao = sessao("igr_1");
        let m = momento();
        let mut estado = pagina.abrir(&sessao, &m);
        pagina.solicitar_exclusao(&mut estado, "evt_1");
        pagina.cancelar_exclusao(&mut estado);
        assert_eq!(estado.modais.confirmacao.alvo(), None);
    }

    // Armazenamento que lê normalmente mas não consegue gravar
    struct DiscoCheio;

    impl LocalStorage for DiscoCheio {
        fn get_item(&self, _chave: &str) -> Option<String> {
            None
        }
        fn set_item(&self, _chave: &str, _valor: &str) -> Result<(), AppError> {
            Err(std::io::Error::other("disco cheio").into())
        }
        fn remove_item(&self, _chave: &str) -> Result<(), AppError> {
            Ok(())
        }
    }

    #[test]
    fn falha_de_gravacao_vira_toast_de_erro() {
        let pagina = PaginaCrud::<ComunicadoForm>::new(
            ConfigPagina {
                caminho: "/igreja/comunicados",
                ..CONFIG
            },
            Arc::new(DiscoCheio),
            Duration::from_millis(3000),
        );
        let sessao = sessao("igr_1");
        let m = momento();
        let mut estado = pagina.abrir(&sessao, &m);
        pagina.submeter(
            &mut estado,
            &sessao,
            ComunicadoForm {
                titulo: "Retiro".into(),
                conteudo: "Sábado".into(),
                prioridade: "normal".into(),
            },
            &m,
        );

        let toast = estado.toast.visivel(m.instante).unwrap();
        assert_eq!(toast.tipo, TipoToast::Erro);
        assert_eq!(toast.mensagem, MSG_FALHA_GRAVACAO);
        assert!(estado.modais.criacao.aberto());
        assert!(Repository::<Comunicado>::new(Arc::new(DiscoCheio)).load_all().is_empty());
    }
}
