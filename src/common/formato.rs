// src/common/formato.rs

use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc, Weekday};
use rust_decimal::{Decimal, RoundingStrategy};

const MESES_ABREVIADOS: [&str; 12] = [
    "JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ",
];

const MESES: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

/// "R$ 1.234,56"
pub fn formatar_brl(valor: Decimal) -> String {
    let arredondado = valor.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let texto = format!("{:.2}", arredondado.abs());
    let (inteiro, centavos) = texto.split_once('.').unwrap_or((texto.as_str(), "00"));

    // Agrupa os milhares com ponto, da direita para a esquerda
    let digitos: Vec<char> = inteiro.chars().collect();
    let mut agrupado = String::with_capacity(digitos.len() + digitos.len() / 3);
    for (i, c) in digitos.iter().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(*c);
    }

    let sinal = if arredondado.is_sign_negative() && !arredondado.is_zero() { "-" } else { "" };
    format!("{}R$ {},{}", sinal, agrupado, centavos)
}

/// Interpreta o valor digitado no formulário ("1.234,56", "50,5", "R$ 10").
///
/// Com vírgula, ela é o separador decimal e os pontos são milhares. Sem vírgula,
/// um único ponto é decimal e vários pontos são milhares. O resultado é
/// arredondado para centavos.
pub fn parse_valor(entrada: &str) -> Option<Decimal> {
    let limpo: String = entrada
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    if limpo.is_empty() {
        return None;
    }

    let normalizado = if limpo.contains(',') {
        limpo.replace('.', "").replacen(',', ".", 1)
    } else if limpo.matches('.').count() > 1 {
        limpo.replace('.', "")
    } else {
        limpo
    };

    Decimal::from_str(&normalizado)
        .ok()
        .map(|v| v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// "16/10/2026"
pub fn formatar_data(data: NaiveDate) -> String {
    data.format("%d/%m/%Y").to_string()
}

/// "16/10/2026 14:30"
pub fn formatar_data_hora(instante: NaiveDateTime) -> String {
    instante.format("%d/%m/%Y %H:%M").to_string()
}

pub fn mes_abreviado(data: NaiveDate) -> &'static str {
    MESES_ABREVIADOS[data.month0() as usize]
}

/// "Sexta-feira, 16 de outubro de 2026"
pub fn data_por_extenso(data: NaiveDate) -> String {
    let dia_semana = match data.weekday() {
        Weekday::Mon => "Segunda-feira",
        Weekday::Tue => "Terça-feira",
        Weekday::Wed => "Quarta-feira",
        Weekday::Thu => "Quinta-feira",
        Weekday::Fri => "Sexta-feira",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    };
    format!(
        "{}, {} de {} de {}",
        dia_semana,
        data.day(),
        MESES[data.month0() as usize],
        data.year()
    )
}

/// Mesmo mês e ano de `hoje`.
pub fn mesmo_mes(data: NaiveDate, hoje: NaiveDate) -> bool {
    data.year() == hoje.year() && data.month() == hoje.month()
}

/// "1 registro" / "3 registros"
pub fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("1 {}", singular)
    } else {
        format!("{} {}", n, plural)
    }
}

/// Tempo decorrido em linguagem do dia a dia: "Agora", "Há 5 min", "Há 3h",
/// "Ontem", "Há 4 dias". Depois de uma semana vira a data curta ("02 OUT").
pub fn tempo_relativo(quando: DateTime<Utc>, agora: DateTime<Utc>) -> String {
    let passado = agora.signed_duration_since(quando);
    let minutos = passado.num_minutes();
    let horas = passado.num_hours();
    let dias = passado.num_days();

    if minutos < 1 {
        "Agora".to_string()
    } else if minutos < 60 {
        format!("Há {} min", minutos)
    } else if horas < 24 {
        format!("Há {}h", horas)
    } else if dias == 1 {
        "Ontem".to_string()
    } else if dias < 7 {
        format!("Há {} dias", dias)
    } else {
        let data = quando.date_naive();
        format!("{:02} {}", data.day(), mes_abreviado(data))
    }
}
