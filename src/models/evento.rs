// src/models/evento.rs

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::entidade::Entidade;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "EventoGravado")]
pub struct Evento {
    pub id: String,
    pub igreja_id: String,

    pub titulo: String,
    #[serde(default)]
    pub descricao: String,

    pub data: NaiveDate, // "2026-10-16"
    // "19:30". Texto HH:MM: a comparação lexicográfica já é cronológica.
    pub hora: String,
    #[serde(default)]
    pub local: String,

    pub criado_em: DateTime<Utc>,
}

// Alguns registros usam `horario` no lugar de `hora`, ou os dois.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventoGravado {
    id: String,
    igreja_id: String,
    titulo: String,
    #[serde(default)]
    descricao: String,
    data: NaiveDate,
    #[serde(default)]
    hora: Option<String>,
    #[serde(default)]
    horario: Option<String>,
    #[serde(default)]
    local: String,
    criado_em: DateTime<Utc>,
}

impl From<EventoGravado> for Evento {
    fn from(g: EventoGravado) -> Self {
        Evento {
            id: g.id,
            igreja_id: g.igreja_id,
            titulo: g.titulo,
            descricao: g.descricao,
            data: g.data,
            hora: g.hora.or(g.horario).unwrap_or_default(),
            local: g.local,
            criado_em: g.criado_em,
        }
    }
}

impl Evento {
    /// Eventos de hoje ainda contam como próximos.
    pub fn eh_proximo(&self, hoje: NaiveDate) -> bool {
        self.data >= hoje
    }
}

impl Entidade for Evento {
    const STORAGE_KEY: &'static str = "cf_eventos";
    const PREFIXO_ID: &'static str = "evt";

    fn id(&self) -> &str {
        &self.id
    }

    fn igreja_id(&self) -> &str {
        &self.igreja_id
    }

    // Próximos primeiro (mais perto antes, desempate pela hora);
    // depois os passados, do mais recente para o mais antigo.
    fn ordenar(a: &Self, b: &Self, hoje: NaiveDate) -> Ordering {
        match (a.eh_proximo(hoje), b.eh_proximo(hoje)) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (true, true) => a.data.cmp(&b.data).then_with(|| a.hora.cmp(&b.hora)),
            (false, false) => b.data.cmp(&a.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn evento(id: &str, data: NaiveDate, hora: &str) -> Evento {
        Evento {
            id: id.to_string(),
            igreja_id: "igr_1".to_string(),
            titulo: format!("Evento {}", id),
            descricao: String::new(),
            data,
            hora: hora.to_string(),
            local: "Templo sede".to_string(),
            criado_em: Utc::now(),
        }
    }

    #[test]
    fn proximos_antes_dos_passados() {
        let hoje = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let mut eventos = vec![
            evento("ontem", hoje - Duration::days(1), "19:00"),
            evento("mais5", hoje + Duration::days(5), "19:00"),
            evento("hoje", hoje, "19:00"),
            evento("amanha", hoje + Duration::days(1), "19:00"),
        ];

        eventos.sort_by(|a, b| Evento::ordenar(a, b, hoje));

        let ordem: Vec<&str> = eventos.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ordem, vec!["hoje", "amanha", "mais5", "ontem"]);
    }

    #[test]
    fn mesmo_dia_ordena_pela_hora_e_passados_decrescem() {
        let hoje = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let mut eventos = vec![
            evento("noite", hoje, "20:00"),
            evento("manha", hoje, "08:30"),
            evento("mes_passado", hoje - Duration::days(30), "10:00"),
            evento("semana_passada", hoje - Duration::days(7), "10:00"),
        ];

        eventos.sort_by(|a, b| Evento::ordenar(a, b, hoje));

        let ordem: Vec<&str> = eventos.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ordem, vec!["manha", "noite", "semana_passada", "mes_passado"]);
    }

    #[test]
    fn aceita_registro_com_campo_horario() {
        let json = r#"{"id":"e1","igrejaId":"igr_1","titulo":"Culto","data":"2026-10-18",
            "horario":"18:00","local":"Templo","criadoEm":"2026-10-01T12:00:00.000Z"}"#;
        let ev: Evento = serde_json::from_str(json).unwrap();
        assert_eq!(ev.hora, "18:00");
        assert_eq!(ev.descricao, "");
    }

    #[test]
    fn registro_com_hora_e_horario_prefere_hora() {
        let json = r#"{"id":"e1","igrejaId":"igr_1","titulo":"Culto","data":"2026-10-18",
            "hora":"19:30","horario":"18:00","criadoEm":"2026-10-01T12:00:00.000Z"}"#;
        let ev: Evento = serde_json::from_str(json).unwrap();
        assert_eq!(ev.hora, "19:30");
    }
}
