// src/analysis/prompt.rs

use crate::extract::{PlayerRecord, Schema};

pub const NO_PLAYER_DATA: &str = "Não há dados de jogadores para analisar.";

const TEMPLATE_HEAD: &str = "\
Você é um líder assistente de um clã de Clash Royale chamado \"Joji Clã\".
Sua tarefa é analisar os dados de participação na guerra do dia e fornecer um resumo claro e uma sugestão de ação direta.
Seja conciso, pragmático e direto. Use formatação com bullet points.

**Análise Requerida:**
1.  **Diagnóstico Rápido:** Forneça um resumo muito breve da situação (ex: \"Muitos jogadores não participaram\", \"A maioria participou bem\", etc.).
2.  **Jogadores Críticos:** Liste os jogadores com 0 ou 1 deck usado, pois eles são a prioridade para uma ação (cobrança ou expulsão).
3.  **Sugestão de Ação:** Com base nos dados, sugira uma ação clara e direta para o líder do clã (ex: \"Enviar um aviso final para os jogadores com 0 decks\", \"Monitorar os jogadores com participação parcial\", \"Parabenizar o clã pelo bom desempenho\").
";

/// `Dados de participação na guerra:` followed by one bullet per player.
pub fn format_player_data(records: &[PlayerRecord], schema: Schema) -> String {
    if records.is_empty() {
        return s!(NO_PLAYER_DATA);
    }
    let lines: Vec<String> = records
        .iter()
        .map(|p| match schema {
            Schema::Compact => format!("- {}: {} decks usados (Status: {})", p.name, p.decks_used, p.status),
            Schema::Full => format!(
                "- {}: {} decks usados, {} de fama (Status: {})",
                p.name, p.decks_used, p.fame, p.status
            ),
        })
        .collect();
    format!("Dados de participação na guerra:\n{}", lines.join("\n"))
}

/// Fixed instructions + today's goal + the serialized player data.
pub fn build_prompt(records: &[PlayerRecord], schema: Schema, goal: u32) -> String {
    let goal_line = if goal == 0 {
        s!("Hoje é dia de treino: não há meta de decks.")
    } else {
        format!("Meta acumulada de hoje: {} decks por jogador.", goal)
    };
    join!(
        TEMPLATE_HEAD,
        "\n**Dados para Análise:**\n",
        &goal_line,
        "\n",
        &format_player_data(records, schema),
        "\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, decks: &str, status: &str) -> PlayerRecord {
        PlayerRecord { name: s!(name), decks_used: s!(decks), fame: s!("900"), status: s!(status) }
    }

    #[test]
    fn empty_data_message() {
        assert_eq!(format_player_data(&[], Schema::Compact), NO_PLAYER_DATA);
    }

    #[test]
    fn compact_lines() {
        let out = format_player_data(&[rec("Ana", "4", "OK"), rec("Bruno", "0", "Crítico")], Schema::Compact);
        assert_eq!(
            out,
            "Dados de participação na guerra:\n- Ana: 4 decks usados (Status: OK)\n- Bruno: 0 decks usados (Status: Crítico)"
        );
    }

    #[test]
    fn full_lines_mention_fame() {
        let out = format_player_data(&[rec("Ana", "4", "OK")], Schema::Full);
        assert!(out.ends_with("- Ana: 4 decks usados, 900 de fama (Status: OK)"));
    }

    #[test]
    fn prompt_carries_template_goal_and_data() {
        let p = build_prompt(&[rec("Ana", "4", "OK")], Schema::Compact, 8);
        assert!(p.starts_with("Você é um líder assistente"));
        assert!(p.contains("**Jogadores Críticos:**"));
        assert!(p.contains("Meta acumulada de hoje: 8 decks por jogador."));
        assert!(p.contains("- Ana: 4 decks usados (Status: OK)"));
        assert!(build_prompt(&[], Schema::Compact, 0).contains("dia de treino"));
    }
}
