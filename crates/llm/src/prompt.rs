//! System prompt construction and reply post-processing for the AI coach.
//!
//! Everything here is a pure function of its inputs: the same context always
//! renders the same prompt, byte for byte.

use coach_core::{
    DailyEntry, InteractionMode, LAST_WEEK, ProcrastinationPattern, SuggestedAction, WeeklyPlan,
};

/// Snapshot of the client and course handed to the coach for one exchange.
#[derive(Debug, Clone)]
pub struct CoachContext {
    pub user_name: String,
    pub role_description: Option<String>,
    pub work_context: Option<String>,
    pub main_goal: Option<String>,
    pub current_week: u8,
    pub mode: InteractionMode,
    /// Loaded for `weekly_planning`.
    pub weekly_plan: Option<WeeklyPlan>,
    /// The week's tracker entries, oldest first. Loaded for `reflection`.
    pub daily_entries: Vec<DailyEntry>,
    /// Loaded for `procrastination`.
    pub patterns: Vec<ProcrastinationPattern>,
}

impl CoachContext {
    #[must_use]
    pub fn new(user_name: impl Into<String>, current_week: u8, mode: InteractionMode) -> Self {
        Self {
            user_name: user_name.into(),
            role_description: None,
            work_context: None,
            main_goal: None,
            current_week,
            mode,
            weekly_plan: None,
            daily_entries: Vec::new(),
            patterns: Vec::new(),
        }
    }
}

const BASE_PERSONA: &str = "Jsi AI kouč pro dospělé profesionály v době AI.

ZÁKLADNÍ PRINCIPY:
- Tvoji klienti jsou přetížení, mají pocit chaosu v práci a obavy z AI, ale mají bohaté zkušenosti
- Nejsou hloupí, nejsou děti
- Respektuj jejich autonomii, nenutit, ale nabízet možnosti
- Dávej konkrétní, praktické návrhy navázané na jejich pracovní realitu
- Ptej se na příklady z jejich práce, než dáš rady
- Připomínej souvislost s tím, že chtějí být méně nahraditelní v AI době
- Na konci každé interakce navrhni 1 konkrétní další krok, který mohou udělat dnes nebo zítra
- Mluv česky, jednoduše, partnersky, bez ezoteriky
- Nepoužívej infantilní gamifikaci, ale můžeš lehce ocenit pokrok (\"Tohle je dobrý krok.\")";

const ONBOARDING: &str = "REŽIM: ONBOARDING (Týden 1)

CÍLE TOHOTO ROZHOVORU:
1. Pochopit pracovní kontext klienta
2. Identifikovat 2-3 hlavní problémy
3. Pomoci zvolit jeden kurzový cíl

STRUKTURA ROZHOVORU:
1. Nejprve se zeptej: \"Jaká je tvoje pracovní pozice a co zhruba děláš během týdne?\"
2. Pak se zeptej: \"Co tě v práci nejvíc frustruje? Co ti nejvíc komplikuje den?\"
3. Pak se zeptej: \"Představ si, že za 4 týdny se ohlédneš zpět. Jak bys poznal, že ti tenhle kurz opravdu pomohl?\"

DŮLEŽITÉ:
- Ptej se postupně, nespěchej
- Neboj se jít do hloubky (\"Můžeš mi dát konkrétní příklad?\")
- Na konci rozhovoru navrhni 2-3 konkrétní formulace cílů, ze kterých si klient vybere
- Cíl by měl být: konkrétní, měřitelný, realistický na 4 týdny, spojený s AI érou

PŘÍKLAD DOBRÉHO CÍLE:
\"Za 4 týdny mám jasný týdenní plán, který mi pomáhá chránit 2 hodiny denně na hlubokou práci, takže se cítím méně zahlcený.\"";

const WEEKLY_PLANNING_BODY: &str = "CÍLE:
1. Pomoci roztřídit úkoly do 3 kategorií: high-value, admin, low-value
2. Identifikovat 2-3 úkoly s nejvyšší hodnotou
3. Naplánovat focus bloky (2-3 hodiny deep work)

POSTUP:
1. Zeptej se: \"Co všechno máš tento týden na práci? Vyjmenuj mi úkoly.\"
2. Pro každý úkol se zeptej: \"Jak moc tohle posune tvou práci dopředu?\" (1-10)
3. Pomoz roztřídit:
   - HIGH-VALUE (8-10): Úkoly s vysokým dopadem, vyžadují soustředění
   - ADMIN (5-7): Nutné, ale neposouvají dopředu
   - LOW-VALUE (1-4): Můžou počkat, delegovat nebo zrušit

4. Pro high-value úkoly se zeptej: \"Kdy bys na to mohl mít 2-3 hodiny klidu?\"
5. Navrhni konkrétní focus bloky (den + čas)

DŮLEŽITÉ:
- Focus bloky by měly být realistické (ne každý den)
- Upozorni na možné rušivé prvky
- Připomeň souvislost s hlavním cílem";

const PROCRASTINATION: &str = "REŽIM: ANALÝZA PROKRASTINACE (Týden 3)

CÍLE:
1. Identifikovat 3 typické situace, kdy klient odkládá práci
2. Pro každou situaci definovat první mikro-krok

STRUKTURA ROZHOVORU:
Pro každou situaci (dělej to 3x):
1. \"Na jakou práci nejčastěji odkládáš? Popište konkrétní situaci.\"
2. \"Co přesně se stane těsně předtím, než to odložíš? Co si říkáš?\"
3. \"Jaký první krok by byl tak malý, že by ti nevadilo ho udělat? (Max 5 minut)\"

TYPY VZORCŮ PROKRASTINACE:
- Nejasné zadání → Mikro-krok: \"Napsat 3 otázky, které potřebuji zodpovědět\"
- Velký úkol → Mikro-krok: \"Otevřít dokument a napsat nadpisy sekcí\"
- Strach z chyby → Mikro-krok: \"Napsat první draft, který nikomu neukážu\"
- Nuda/únava → Mikro-krok: \"Nastavit timer na 10 minut a začít\"

DŮLEŽITÉ:
- Mikro-krok musí být OPRAVDU malý (5 minut max)
- Musí být konkrétní akce, ne \"zamyslet se nad\"
- Klient by měl cítit, že to zvládne hned teď

Na konci vytvoř 3 konkrétní vzorce ve formátu:
SITUACE | TYP VZORCE | MIKRO-KROK";

const REFLECTION_BODY: &str = "CÍLE:
1. Zhodnotit uplynulý týden
2. Identifikovat vzorce (co fungovalo, co ne)
3. Navrhnout úpravy pro další týden

STRUKTURA:
1. \"Jak bys celkově ohodnotil tento týden? (1-10)\"
2. \"Co se povedlo? Jaké dny byly dobré a proč?\"
3. \"Co bylo těžké? Kdy ses cítil zahlcený?\"
4. Na základě dat navrhni 2-3 konkrétní pozorování
5. \"Co bys chtěl příští týden dělat jinak?\"";

const REFLECTION_RULES: &str = "DŮLEŽITÉ:
- Buď konkrétní, odkazuj se na data z trackeru
- Hledej vzorce (např. \"Všimni si, že v pondělí a úterý...\")
- Vyhýbej se obecným radám, zaměř se na jeho specifickou situaci
- Uznávej pokrok, i když malý";

const AD_HOC: &str = "REŽIM: VOLNÁ KONVERZACE

Klient se ptá na něco mimo strukturovaný program.

PRINCIPY:
- Odpověz na otázku konkrétně a prakticky
- Propoj odpověď s jeho cílem a kontextem, pokud je relevantní
- Pokud nevíš, přiznej to a nabídni, co můžeš
- Pokud se ptá na něco, co by měl řešit s koučem nebo terapeutem, upozorni ho na to

PŘÍKLADY OTÁZEK:
- \"Jak se naučit říkat ne?\" → Dej konkrétní techniku + příklad z jeho práce
- \"Jak zvládnout overwhelm?\" → Ptej se na konkrétní situaci, pak nabídni strategie
- \"Je normální cítit se takhle?\" → Validuj pocity, ale pokud je to vážné, doporuč odborníka";

/// Empty strings fall back too.
fn or_fallback<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty()).unwrap_or(fallback)
}

/// Render the full system prompt: persona, client info, then the mode
/// segment after a blank line.
#[must_use]
pub fn build_system_prompt(ctx: &CoachContext) -> String {
    let client_info = format!(
        "INFORMACE O KLIENTOVI:\n\
         - Jméno: {}\n\
         - Role: {}\n\
         - Kontext práce: {}\n\
         - Hlavní cíl: {}\n\
         - Aktuální týden: {}/{LAST_WEEK}\n",
        ctx.user_name,
        or_fallback(ctx.role_description.as_deref(), "Není specifikováno"),
        or_fallback(ctx.work_context.as_deref(), "Zatím neznámý"),
        or_fallback(ctx.main_goal.as_deref(), "Zatím nestanovený"),
        ctx.current_week,
    );
    format!("{BASE_PERSONA}\n\n{client_info}\n\n{}", mode_instructions(ctx))
}

fn mode_instructions(ctx: &CoachContext) -> String {
    let week = ctx.current_week;
    match ctx.mode {
        InteractionMode::Onboarding => ONBOARDING.to_owned(),
        InteractionMode::WeeklyPlanning => format!(
            "REŽIM: TÝDENNÍ PLÁNOVÁNÍ (Týden {week})\n\n{WEEKLY_PLANNING_BODY}{}",
            saved_plan(ctx.weekly_plan.as_ref())
        ),
        InteractionMode::Procrastination => {
            format!("{PROCRASTINATION}{}", known_patterns(&ctx.patterns))
        },
        InteractionMode::Reflection => format!(
            "REŽIM: TÝDENNÍ REFLEXE (Týden {week})\n\n{REFLECTION_BODY}\n\n{}\n\n{REFLECTION_RULES}",
            tracker_data(&ctx.daily_entries)
        ),
        InteractionMode::AdHoc => AD_HOC.to_owned(),
    }
}

fn task_line(label: &str, tasks: &[String]) -> String {
    if tasks.is_empty() {
        format!("- {label}: -")
    } else {
        format!("- {label}: {}", tasks.join("; "))
    }
}

/// The plan already saved for this week, or nothing.
fn saved_plan(plan: Option<&WeeklyPlan>) -> String {
    let Some(plan) = plan else {
        return String::new();
    };
    let mut lines = vec![
        task_line("Vysoká hodnota", &plan.high_value_tasks),
        task_line("Administrativa", &plan.admin_tasks),
        task_line("Nízká hodnota", &plan.low_value_tasks),
    ];
    lines.extend(plan.focus_blocks.iter().map(|block| {
        format!(
            "- Focus blok: den {}, {}, {} min",
            block.day_of_week, block.start_time, block.duration_min
        )
    }));
    if let Some(notes) = plan.notes.as_deref().filter(|n| !n.is_empty()) {
        lines.push(format!("- Poznámky: {notes}"));
    }
    format!("\n\nULOŽENÝ PLÁN NA TENTO TÝDEN:\n{}", lines.join("\n"))
}

/// Patterns the client has already named, or nothing.
fn known_patterns(patterns: &[ProcrastinationPattern]) -> String {
    if patterns.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = patterns
        .iter()
        .map(|p| format!("- [{}] {} → Mikro-krok: {}", p.pattern_type, p.description, p.micro_step))
        .collect();
    format!("\n\nUŽ ZNÁMÉ VZORCE KLIENTA:\n{}", lines.join("\n"))
}

/// One `- <date>: <entry JSON>` line per entry, or nothing.
fn tracker_data(entries: &[DailyEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            // Plain data structs; serialization cannot fail.
            let json = serde_json::to_string(entry).unwrap_or_default();
            format!("- {}: {json}", entry.date)
        })
        .collect();
    format!("\n\nDATA Z TRACKERU:\n{}", lines.join("\n"))
}

/// Keyword scan of the reply. At most one action; none for reflection and
/// ad hoc conversations.
#[must_use]
pub fn extract_suggested_actions(reply: &str, mode: InteractionMode) -> Vec<SuggestedAction> {
    let (keywords, label, action): (&[&str], &str, &str) = match mode {
        InteractionMode::Onboarding => (&["cíl", "vybereš"], "Uložit hlavní cíl", "save_goal"),
        InteractionMode::WeeklyPlanning => {
            (&["focus", "plán"], "Uložit týdenní plán", "save_weekly_plan")
        },
        InteractionMode::Procrastination => {
            (&["mikro-krok", "vzorec"], "Uložit vzorce", "save_patterns")
        },
        InteractionMode::Reflection | InteractionMode::AdHoc => return Vec::new(),
    };
    if keywords.iter().any(|k| reply.contains(k)) {
        vec![SuggestedAction { label: label.to_owned(), action: action.to_owned() }]
    } else {
        Vec::new()
    }
}

#[must_use]
pub const fn next_step_label(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::Onboarding => "Pokračuj v rozhovoru a zvol svůj hlavní cíl",
        InteractionMode::WeeklyPlanning => "Ulož týdenní plán a začni sledovat focus bloky",
        InteractionMode::Procrastination => "Ulož své 3 vzorce prokrastinace",
        InteractionMode::Reflection => "Zhodnoť tento týden a připrav se na další",
        InteractionMode::AdHoc => "Pokračuj v kurzu",
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use coach_core::DailyFields;

    use super::*;

    fn context(mode: InteractionMode) -> CoachContext {
        let mut ctx = CoachContext::new("Jana", 2, mode);
        ctx.role_description = Some("Projektová manažerka".to_owned());
        ctx
    }

    fn entry(day: u32) -> DailyEntry {
        let stamp = Utc.with_ymd_and_hms(2024, 3, day, 18, 0, 0).unwrap();
        DailyEntry {
            id: format!("e{day}"),
            user_id: "u1".to_owned(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            week_number: 2,
            fields: DailyFields {
                high_impact_step: Some("Strategie".to_owned()),
                ..DailyFields::default()
            },
            created_at: stamp,
            updated_at: stamp,
        }
    }

    #[test]
    fn test_prompt_contains_client_info_and_fallbacks() {
        let prompt = build_system_prompt(&context(InteractionMode::AdHoc));
        assert!(prompt.starts_with("Jsi AI kouč pro dospělé profesionály v době AI."));
        assert!(prompt.contains("- Jméno: Jana\n"));
        assert!(prompt.contains("- Role: Projektová manažerka\n"));
        assert!(prompt.contains("- Kontext práce: Zatím neznámý\n"));
        assert!(prompt.contains("- Hlavní cíl: Zatím nestanovený\n"));
        assert!(prompt.contains("- Aktuální týden: 2/4\n\n\nREŽIM: VOLNÁ KONVERZACE"));
    }

    #[test]
    fn test_empty_goal_uses_fallback() {
        let mut ctx = context(InteractionMode::Onboarding);
        ctx.main_goal = Some(String::new());
        assert!(build_system_prompt(&ctx).contains("- Hlavní cíl: Zatím nestanovený"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let mut ctx = context(InteractionMode::Reflection);
        ctx.daily_entries = vec![entry(4), entry(5)];
        assert_eq!(build_system_prompt(&ctx), build_system_prompt(&ctx.clone()));
    }

    #[test]
    fn test_week_interpolation() {
        let prompt = build_system_prompt(&context(InteractionMode::WeeklyPlanning));
        assert!(prompt.contains("REŽIM: TÝDENNÍ PLÁNOVÁNÍ (Týden 2)"));
        let prompt = build_system_prompt(&context(InteractionMode::Procrastination));
        assert!(prompt.contains("REŽIM: ANALÝZA PROKRASTINACE (Týden 3)"));
    }

    #[test]
    fn test_reflection_includes_tracker_data_only_when_present() {
        let ctx = context(InteractionMode::Reflection);
        assert!(!build_system_prompt(&ctx).contains("DATA Z TRACKERU"));

        let mut ctx = context(InteractionMode::Reflection);
        ctx.daily_entries = vec![entry(4), entry(5)];
        let prompt = build_system_prompt(&ctx);
        assert!(prompt.contains("DATA Z TRACKERU:\n- 2024-03-04: {"));
        assert!(prompt.contains("\n- 2024-03-05: {"));
        assert!(prompt.contains("\"highImpactStep\":\"Strategie\""));
    }

    #[test]
    fn test_weekly_planning_includes_saved_plan() {
        let ctx = context(InteractionMode::WeeklyPlanning);
        assert!(!build_system_prompt(&ctx).contains("ULOŽENÝ PLÁN"));

        let mut ctx = context(InteractionMode::WeeklyPlanning);
        let stamp = Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap();
        ctx.weekly_plan = Some(WeeklyPlan {
            id: "p1".to_owned(),
            user_id: "u1".to_owned(),
            week_number: 2,
            high_value_tasks: vec!["Strategie Q1".to_owned(), "Prezentace".to_owned()],
            admin_tasks: Vec::new(),
            low_value_tasks: Vec::new(),
            focus_blocks: vec![coach_core::FocusBlock {
                day_of_week: 1,
                start_time: "09:00".to_owned(),
                duration_min: 120,
            }],
            notes: None,
            created_at: stamp,
            updated_at: stamp,
        });
        let prompt = build_system_prompt(&ctx);
        assert!(prompt.contains("ULOŽENÝ PLÁN NA TENTO TÝDEN:\n- Vysoká hodnota: Strategie Q1; Prezentace"));
        assert!(prompt.contains("- Administrativa: -"));
        assert!(prompt.contains("- Focus blok: den 1, 09:00, 120 min"));
        assert!(!prompt.contains("Poznámky"));
    }

    #[test]
    fn test_procrastination_lists_known_patterns() {
        let ctx = context(InteractionMode::Procrastination);
        assert!(!build_system_prompt(&ctx).contains("UŽ ZNÁMÉ VZORCE"));

        let mut ctx = context(InteractionMode::Procrastination);
        ctx.patterns = vec![ProcrastinationPattern {
            id: "x1".to_owned(),
            user_id: "u1".to_owned(),
            description: "Odkládám reporty".to_owned(),
            pattern_type: "Nejasné zadání".to_owned(),
            micro_step: "Napsat 3 otázky".to_owned(),
            trigger_phrases: Vec::new(),
            created_at: Utc::now(),
        }];
        let prompt = build_system_prompt(&ctx);
        assert!(prompt.contains(
            "UŽ ZNÁMÉ VZORCE KLIENTA:\n- [Nejasné zadání] Odkládám reporty → Mikro-krok: Napsat 3 otázky"
        ));
    }

    #[test]
    fn test_suggested_actions_per_mode() {
        let actions = extract_suggested_actions("Který cíl si vybereš?", InteractionMode::Onboarding);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, "save_goal");

        let actions =
            extract_suggested_actions("Naplánuj focus blok na úterý", InteractionMode::WeeklyPlanning);
        assert_eq!(actions[0].label, "Uložit týdenní plán");

        let actions =
            extract_suggested_actions("Tvůj mikro-krok je ...", InteractionMode::Procrastination);
        assert_eq!(actions[0].action, "save_patterns");

        assert!(extract_suggested_actions("Dobrý den", InteractionMode::Onboarding).is_empty());
        assert!(extract_suggested_actions("cíl plán vzorec", InteractionMode::AdHoc).is_empty());
        assert!(extract_suggested_actions("cíl", InteractionMode::Reflection).is_empty());
    }

    #[test]
    fn test_next_step_labels() {
        assert_eq!(next_step_label(InteractionMode::AdHoc), "Pokračuj v kurzu");
        assert_eq!(
            next_step_label(InteractionMode::Procrastination),
            "Ulož své 3 vzorce prokrastinace"
        );
    }
}
