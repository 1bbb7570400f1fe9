// src/services/membros_service.rs

use std::sync::Arc;

use chrono::NaiveDate;
use validator::Validate;

use crate::{
    common::{error::AppError, relogio::Momento},
    db::{LocalStorage, Repository},
    models::{Membro, Sessao},
    services::{
        formularios::{ErrosFormulario, PerfilForm},
        sessao_service::SessionGuard,
        toast::ToastNotifier,
    },
};

/// Filtra o rol por substring no nome ou e-mail. Consulta vazia devolve todos.
pub fn buscar(membros: &[Membro], consulta: &str) -> Vec<Membro> {
    let consulta = consulta.trim().to_lowercase();
    if consulta.is_empty() {
        return membros.to_vec();
    }
    membros.iter().filter(|m| m.corresponde(&consulta)).cloned().collect()
}

#[derive(Clone)]
pub struct MembrosService {
    repo: Repository<Membro>,
    guard: SessionGuard,
}

impl MembrosService {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            repo: Repository::new(storage.clone()),
            guard: SessionGuard::new(storage),
        }
    }

    pub fn rol(&self, igreja_id: &str, hoje: NaiveDate) -> Vec<Membro> {
        self.repo.load_for_tenant(igreja_id, hoje)
    }

    /// Atualiza o cadastro do membro e a sessão com o novo nome e e-mail.
    /// Erros de formulário voltam por campo; nada é gravado nesse caso.
    pub fn atualizar_perfil(
        &self,
        sessao: &Sessao,
        mut form: PerfilForm,
        momento: &Momento,
        toast: &mut ToastNotifier,
    ) -> Result<Result<Sessao, ErrosFormulario>, AppError> {
        form.normalizar();
        if let Err(errors) = form.validate() {
            return Ok(Err(ErrosFormulario::from(&errors)));
        }

        if let Some(id) = sessao.id.as_deref() {
            let atualizado = self.repo.update_field(id, |m| {
                m.nome_completo = form.nome.clone();
                m.email = form.email.clone();
            })?;
            if atualizado.is_none() {
                tracing::warn!("⚠️ Membro {} da sessão não existe mais no rol", id);
            }
        }

        let nova = Sessao {
            nome: form.nome,
            email: Some(form.email),
            ..sessao.clone()
        };
        self.guard.gravar(&nova)?;

        toast.sucesso("Perfil atualizado!", momento.instante);
        Ok(Ok(nova))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStorage;
    use crate::models::{sessao::EntradaPayload, Igreja, Papel};
    use crate::services::sessao_service::SessaoService;
    use chrono::{TimeZone, Utc};
    use serde_json::Map;

    fn membro(id: &str, nome: &str, email: &str) -> Membro {
        Membro {
            id: id.into(),
            igreja_id: "igr_1".into(),
            nome_completo: nome.into(),
            email: email.into(),
            criado_em: None,
        }
    }

    #[test]
    fn busca_por_nome_ou_email_sem_caixa() {
        let rol = vec![
            membro("m1", "Maria Silva", "maria@ex.com"),
            membro("m2", "João Pedro", "jp@ex.com"),
            membro("m3", "Ana", "ANA.MARIA@ex.com"),
        ];

        let achados = buscar(&rol, "maria");
        let ids: Vec<&str> = achados.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m3"]);
        assert_eq!(buscar(&rol, "  ").len(), 3);
        assert!(buscar(&rol, "zzz").is_empty());
    }

    #[test]
    fn perfil_atualiza_rol_e_sessao() {
        let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::new());
        let repo = Repository::<Membro>::new(storage.clone());
        repo.create(&membro("mbr_1", "Ana", "ana@ex.com")).unwrap();
        let service = MembrosService::new(storage.clone());

        let sessao = Sessao {
            id: Some("mbr_1".into()),
            igreja_id: "igr_1".into(),
            tipo: Papel::Membro,
            nome: "Ana".into(),
            nome_igreja: "Central".into(),
            email: Some("ana@ex.com".into()),
            codigo_igreja: Some("ABC123".into()),
            logado_em: None,
            extras: Map::new(),
        };
        let momento = Momento::em(
            Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        );
        let mut toast = ToastNotifier::default();

        let nova = service
            .atualizar_perfil(
                &sessao,
                PerfilForm {
                    nome: " Ana Souza ".into(),
                    email: "ana.souza@ex.com".into(),
                },
                &momento,
                &mut toast,
            )
            .unwrap()
            .unwrap();

        assert_eq!(nova.nome, "Ana Souza");
        assert_eq!(nova.codigo_igreja.as_deref(), Some("ABC123"));
        assert_eq!(repo.find_by_id("mbr_1").unwrap().nome_completo, "Ana Souza");
        assert_eq!(
            SessionGuard::new(storage).exigir(Papel::Membro).unwrap().email.as_deref(),
            Some("ana.souza@ex.com")
        );

        let erros = service
            .atualizar_perfil(&sessao, PerfilForm::default(), &momento, &mut toast)
            .unwrap()
            .unwrap_err();
        assert_eq!(erros.get("nome"), Some("Informe seu nome."));
        assert_eq!(erros.get("email"), Some("Informe seu e-mail."));
    }

    #[test]
    fn perfil_de_membro_legado_continua_no_rol_e_no_login() {
        let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::new());
        let agora = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        Repository::<Igreja>::new(storage.clone())
            .create(&Igreja {
                id: "igr_1".into(),
                nome: "Central".into(),
                codigo: "ABC123".into(),
                criado_em: agora,
            })
            .unwrap();
        // Registro antigo: só o campo "nome"
        storage
            .set_item(
                "cf_membros",
                r#"[{"id":"mbr_2","igrejaId":"igr_1","nome":"Bia","email":"bia@ex.com"}]"#,
            )
            .unwrap();
        let repo = Repository::<Membro>::new(storage.clone());
        assert_eq!(repo.load_all().len(), 1);

        let sessao = Sessao {
            id: Some("mbr_2".into()),
            igreja_id: "igr_1".into(),
            tipo: Papel::Membro,
            nome: "Bia".into(),
            nome_igreja: "Central".into(),
            email: Some("bia@ex.com".into()),
            codigo_igreja: Some("ABC123".into()),
            logado_em: None,
            extras: Map::new(),
        };
        let momento = Momento::em(agora, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        let mut toast = ToastNotifier::default();
        MembrosService::new(storage.clone())
            .atualizar_perfil(
                &sessao,
                PerfilForm {
                    nome: "Bia Souza".into(),
                    email: "bia@ex.com".into(),
                },
                &momento,
                &mut toast,
            )
            .unwrap()
            .unwrap();

        // O campo antigo continua gravado ao lado do novo
        let bruto = storage.get_item("cf_membros").unwrap();
        assert!(bruto.contains(r#""nome":"Bia""#));
        assert!(bruto.contains(r#""nomeCompleto":"Bia Souza""#));

        let rol = repo.load_all();
        assert_eq!(rol.len(), 1);
        assert_eq!(rol[0].nome_completo, "Bia Souza");

        // Novo acesso reencontra o mesmo membro
        let nova = SessaoService::new(storage.clone())
            .entrar(
                EntradaPayload {
                    tipo: "membro".into(),
                    nome: "Bia".into(),
                    email: "bia@ex.com".into(),
                    codigo_igreja: "ABC123".into(),
                    ..EntradaPayload::default()
                },
                agora,
            )
            .unwrap();
        assert_eq!(nova.id.as_deref(), Some("mbr_2"));
        assert_eq!(nova.nome, "Bia Souza");
        assert_eq!(repo.load_all().len(), 1);
    }
}
