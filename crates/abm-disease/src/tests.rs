//! Unit tests for abm-disease.

#[cfg(test)]
mod helpers {
    use abm_agent::{Population, PopulationBuilder};
    use abm_core::{AgentId, Config, SimRng};

    pub fn population(n: usize) -> Population {
        PopulationBuilder::new(n).build(&mut SimRng::new(0))
    }

    /// Default config with Long COVID switched off, so the infected
    /// update draws nothing.
    pub fn no_lc_config() -> Config {
        Config { long_covid: false, ..Config::default() }
    }

    /// Put `agent` into a hand-crafted infected state.
    pub fn make_infected(pop: &mut Population, agent: AgentId, timer: u32, symptom: (u32, u32)) {
        let i = agent.index();
        pop.infected[i] = true;
        pop.virus_check_timer[i] = timer;
        pop.number_of_infection[i] = 1;
        pop.infectious_start[i] = 1;
        pop.infectious_end[i] = 5;
        pop.symptomatic_start[i] = symptom.0;
        pop.symptomatic_duration[i] = symptom.1;
    }
}

// ── Infection lifecycle ───────────────────────────────────────────────────────

#[cfg(test)]
mod infection {
    use abm_agent::{PopulationBuilder, RecoveryGroup};
    use abm_core::{AgentId, Config, Day, SimRng};

    use super::helpers::{make_infected, no_lc_config, population};
    use crate::long_covid::weibull_params;
    use crate::{infect, seed_initial_infections, update_immune, update_infected};

    #[test]
    fn infect_sets_fresh_infection_state() {
        let config = Config::default();
        let mut pop = population(3);
        let mut rng = SimRng::new(7);
        let a = AgentId(1);
        pop.immuned[1] = true;

        assert!(infect(&mut pop, a, Day(12), &config, &mut rng));
        assert!(pop.infected[1]);
        assert!(!pop.immuned[1]);
        assert_eq!(pop.number_of_infection[1], 1);
        assert_eq!(pop.infection_start_tick[1], 12);
        assert_eq!(pop.virus_check_timer[1], 0);
        assert_eq!(pop.infectious_start[1], 1);
        let contagious = pop.transfer_active_duration[1];
        assert!((1..=config.active_duration).contains(&contagious));
        assert_eq!(pop.infectious_end[1], 1 + contagious);
        assert_eq!(pop.long_covid_recovery_group[1], RecoveryGroup::NONE_CODE);
    }

    #[test]
    fn contagious_window_capped_by_infected_period() {
        let config = Config { active_duration: 50, infected_period: 4, ..Config::default() };
        let mut pop = population(200);
        let mut rng = SimRng::new(3);
        for a in pop.agent_ids() {
            infect(&mut pop, a, Day::ZERO, &config, &mut rng);
        }
        assert!(pop.transfer_active_duration.iter().all(|&d| (1..=3).contains(&d)));
    }

    #[test]
    fn super_immune_agent_is_never_infected() {
        let config = Config::default();
        let mut pop = PopulationBuilder::new(2).force_super_immune(AgentId(0)).build(&mut SimRng::new(0));
        assert!(!infect(&mut pop, AgentId(0), Day(3), &config, &mut SimRng::new(1)));
        assert!(!pop.infected[0]);
        assert_eq!(pop.number_of_infection[0], 0);
    }

    #[test]
    fn asymptomatic_course_has_no_symptom_window() {
        let config = Config { asymptomatic_pct: 100.0, ..Config::default() };
        let mut pop = population(20);
        let mut rng = SimRng::new(5);
        for a in pop.agent_ids() {
            infect(&mut pop, a, Day::ZERO, &config, &mut rng);
        }
        assert!(pop.symptomatic_start.iter().all(|&s| s == 0));
        assert!(pop.symptomatic_duration.iter().all(|&d| d == 0));
    }

    #[test]
    fn symptomatic_course_bounds() {
        let config = Config { asymptomatic_pct: 0.0, ..Config::default() };
        let mut pop = population(300);
        let mut rng = SimRng::new(11);
        for a in pop.agent_ids() {
            infect(&mut pop, a, Day::ZERO, &config, &mut rng);
        }
        for i in 0..pop.count {
            let start = pop.symptomatic_start[i];
            assert!(start >= 1 && start <= pop.transfer_active_duration[i]);
            assert!(start <= config.incubation_period);
            // base >= min (1) plus one infection's worth of extra days.
            assert!(pop.symptomatic_duration[i] >= 1 + config.effect_of_reinfection);
            assert!(pop.symptomatic_duration[i] <= 60 + config.effect_of_reinfection);
        }
    }

    #[test]
    fn reinfection_while_lc_active_raises_severity() {
        let config = Config { asymptomatic_pct: 0.0, ..Config::default() };
        let mut pop = population(1);
        let a = AgentId(0);
        pop.number_of_infection[0] = 1;
        pop.start_long_covid(a, RecoveryGroup::Fast, (1.5, 60.0), 85.0);

        infect(&mut pop, a, Day(40), &config, &mut SimRng::new(2));
        assert!(pop.is_lc_active(a));
        assert_eq!(pop.long_covid_severity[0], 90.0);
        let group = pop.recovery_group(a).expect("still LC-active");
        assert!(matches!(group, RecoveryGroup::Fast | RecoveryGroup::Gradual));
        assert_eq!((pop.long_covid_weibull_k[0], pop.long_covid_weibull_lambda[0]), weibull_params(group));
        // trunc((1 + 3 * 2) * 1.5) at minimum.
        assert!(pop.symptomatic_duration[0] >= 10);
    }

    #[test]
    fn seeding_skips_super_immune_agents() {
        let config = Config { initial_infected_agents: 5, ..Config::default() };
        let mut builder = PopulationBuilder::new(20);
        for i in 0..15 {
            builder = builder.force_super_immune(AgentId(i));
        }
        let mut pop = builder.build(&mut SimRng::new(0));
        let seeds = seed_initial_infections(&mut pop, &config, &mut SimRng::new(9));

        assert_eq!(seeds.len(), 5);
        assert_eq!(pop.count_infected(), 5);
        assert!(seeds.iter().all(|a| a.0 >= 15));
    }

    #[test]
    fn seeding_clamps_to_eligible_agents() {
        let config = Config { initial_infected_agents: 5, ..Config::default() };
        let mut pop = PopulationBuilder::new(3)
            .force_super_immune(AgentId(0))
            .force_super_immune(AgentId(2))
            .build(&mut SimRng::new(0));
        let seeds = seed_initial_infections(&mut pop, &config, &mut SimRng::new(1));
        assert_eq!(seeds, vec![AgentId(1)]);
    }

    #[test]
    fn infected_becomes_immune_after_infected_period() {
        let config = no_lc_config();
        let mut pop = population(1);
        make_infected(&mut pop, AgentId(0), 0, (0, 0));
        let mut rng = SimRng::new(0);

        for _ in 0..config.infected_period - 1 {
            update_infected(&mut pop, &config, &mut rng);
        }
        assert!(pop.infected[0]);
        update_infected(&mut pop, &config, &mut rng);
        assert!(!pop.infected[0]);
        assert!(pop.immuned[0]);
        assert_eq!(pop.virus_check_timer[0], 0);
    }

    #[test]
    fn symptomatic_flag_follows_window() {
        let config = no_lc_config();
        let mut pop = population(1);
        make_infected(&mut pop, AgentId(0), 0, (2, 3));
        let mut rng = SimRng::new(0);

        let mut flags = Vec::new();
        for _ in 0..6 {
            update_infected(&mut pop, &config, &mut rng);
            flags.push(pop.symptomatic[0]);
        }
        assert_eq!(flags, vec![false, true, true, true, false, false]);
    }

    #[test]
    fn long_symptom_course_triggers_onset_at_threshold() {
        let config = Config { infected_period: 50, ..Config::default() };
        let mut pop = population(1);
        make_infected(&mut pop, AgentId(0), 0, (1, 40));
        let mut rng = SimRng::new(0);

        for _ in 0..30 {
            update_infected(&mut pop, &config, &mut rng);
        }
        assert!(!pop.is_lc_active(AgentId(0)));
        update_infected(&mut pop, &config, &mut rng);
        assert!(pop.is_lc_active(AgentId(0)));
        assert!(!pop.lc_pending[0]);
    }

    #[test]
    fn asymptomatic_onset_is_deferred() {
        let config = Config {
            lc_onset_base_pct:    100.0,
            asymptomatic_lc_mult: 1.0,
            ..Config::default()
        };
        let mut pop = population(1);
        pop.age[0] = 40;
        pop.gender[0] = abm_agent::Gender::Male;
        make_infected(&mut pop, AgentId(0), 0, (0, 0));
        pop.infection_start_tick[0] = 5;
        let mut rng = SimRng::new(0);

        for _ in 0..config.infected_period {
            update_infected(&mut pop, &config, &mut rng);
        }
        assert!(pop.immuned[0]);
        assert!(pop.lc_pending[0]);
        assert_eq!(pop.lc_onset_day[0], 35);
        assert!(!pop.is_lc_active(AgentId(0)));
    }

    #[test]
    fn short_symptom_course_rolls_when_symptoms_end() {
        let config = Config { lc_onset_base_pct: 100.0, ..Config::default() };
        let mut pop = population(1);
        pop.age[0] = 40;
        make_infected(&mut pop, AgentId(0), 0, (2, 5));
        let mut rng = SimRng::new(0);

        for _ in 0..6 {
            update_infected(&mut pop, &config, &mut rng);
        }
        assert!(!pop.lc_pending[0]);
        update_infected(&mut pop, &config, &mut rng);
        assert!(pop.lc_pending[0]);
        assert_eq!(pop.lc_onset_day[0], config.long_covid_time_threshold);
    }

    #[test]
    fn zero_onset_rate_never_schedules() {
        let config = Config { lc_onset_base_pct: 0.0, ..Config::default() };
        let mut pop = population(1);
        make_infected(&mut pop, AgentId(0), 0, (0, 0));
        let mut rng = SimRng::new(0);
        for _ in 0..config.infected_period {
            update_infected(&mut pop, &config, &mut rng);
        }
        assert!(!pop.lc_pending[0]);
    }

    #[test]
    fn huge_durations_do_not_overflow_timelines() {
        let config = Config {
            lc_onset_base_pct:         100.0,
            long_covid_time_threshold: u32::MAX,
            ..Config::default()
        };
        let mut pop = population(2);
        pop.age[1] = 40;
        pop.gender[1] = abm_agent::Gender::Male;
        // Symptoms that never end; the short-course check sees duration <= threshold.
        make_infected(&mut pop, AgentId(0), 0, (2, u32::MAX));
        // Short course ending on timer 3; onset day saturates.
        make_infected(&mut pop, AgentId(1), 0, (2, 1));
        pop.infection_start_tick[1] = 5;
        let mut rng = SimRng::new(0);

        for _ in 0..3 {
            update_infected(&mut pop, &config, &mut rng);
        }
        assert!(pop.symptomatic[0]);
        assert!(pop.lc_pending[1]);
        assert_eq!(pop.lc_onset_day[1], u32::MAX);
    }

    #[test]
    fn immunity_wanes_after_immune_period() {
        let config = Config::default();
        let mut pop = population(1);
        pop.immuned[0] = true;
        // Timer restarts at 0 on the infected -> immune transition.
        for _ in 0..config.immunity_end() - 1 {
            update_immune(&mut pop, &config);
        }
        assert!(pop.immuned[0]);
        update_immune(&mut pop, &config);
        assert!(!pop.immuned[0]);
        assert_eq!(pop.virus_check_timer[0], 0);
    }
}

// ── Long COVID ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod long_covid {
    use abm_agent::{Gender, RecoveryGroup};
    use abm_core::{AgentId, Config, Day, SimRng};

    use super::helpers::population;
    use crate::long_covid::{daily_recovery_pct, weibull_params, worsen_on_reinfection};
    use crate::{activate_pending, assign_group, onset_probability, recovery_pass};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn onset_probability_multipliers() {
        let config = Config::default();
        let mut pop = population(3);

        pop.age[0] = 70;
        pop.gender[0] = Gender::Male;
        assert!(close(onset_probability(&pop, AgentId(0), &config, false), 15.0 * 1.3));

        pop.age[1] = 20;
        pop.gender[1] = Gender::Female;
        pop.vaccinated[1] = true;
        assert!(close(onset_probability(&pop, AgentId(1), &config, false), 15.0 * 0.9 * 1.2 * 0.7));

        pop.age[2] = 40;
        pop.gender[2] = Gender::Male;
        pop.number_of_infection[2] = 2;
        assert!(close(onset_probability(&pop, AgentId(2), &config, true), 15.0 * 0.7 * 0.5));
    }

    #[test]
    fn onset_probability_is_clipped() {
        let config = Config { lc_onset_base_pct: 500.0, ..Config::default() };
        let pop = population(1);
        assert_eq!(onset_probability(&pop, AgentId(0), &config, false), 100.0);
    }

    #[test]
    fn assign_group_respects_weights() {
        let all_fast = Config { lc_base_fast_prob: 100.0, lc_base_persistent_prob: 0.0, ..Config::default() };
        let mut pop = population(50);
        let mut rng = SimRng::new(4);
        for a in pop.agent_ids() {
            assign_group(&mut pop, a, &all_fast, &mut rng);
            assert_eq!(pop.recovery_group(a), Some(RecoveryGroup::Fast));
            assert_eq!(
                (pop.long_covid_weibull_k[a.index()], pop.long_covid_weibull_lambda[a.index()]),
                weibull_params(RecoveryGroup::Fast),
            );
            let sev = pop.long_covid_severity[a.index()];
            assert!((5.0..=100.0).contains(&sev));
            assert_eq!(pop.long_covid_duration[a.index()], 0);
        }
    }

    #[test]
    fn oversized_weights_are_rescaled() {
        let config = Config { lc_base_fast_prob: 150.0, lc_base_persistent_prob: 50.0, ..Config::default() };
        let mut pop = population(200);
        let mut rng = SimRng::new(8);
        for a in pop.agent_ids() {
            pop.age[a.index()] = 70;
            assign_group(&mut pop, a, &config, &mut rng);
        }
        let groups: Vec<_> = pop.agent_ids().filter_map(|a| pop.recovery_group(a)).collect();
        assert_eq!(groups.len(), 200);
        assert!(!groups.contains(&RecoveryGroup::Gradual));
        assert!(groups.contains(&RecoveryGroup::Fast));
        assert!(groups.contains(&RecoveryGroup::Persistent));
    }

    /// Shares of `(fast, persistent, gradual)` over `n` assignments for
    /// agents of one age and symptom length.
    fn group_shares(config: &Config, age: u8, symptom_days: u32, n: usize, seed: u64) -> (f64, f64, f64) {
        let mut pop = population(n);
        let mut rng = SimRng::new(seed);
        let mut counts = [0usize; 3];
        for a in pop.agent_ids() {
            pop.age[a.index()] = age;
            pop.symptomatic_duration[a.index()] = symptom_days;
            assign_group(&mut pop, a, config, &mut rng);
            match pop.recovery_group(a) {
                Some(RecoveryGroup::Fast)       => counts[0] += 1,
                Some(RecoveryGroup::Persistent) => counts[1] += 1,
                Some(RecoveryGroup::Gradual)    => counts[2] += 1,
                None => panic!("agent {a} not LC-active after assignment"),
            }
        }
        let n = n as f64;
        (counts[0] as f64 / n, counts[1] as f64 / n, counts[2] as f64 / n)
    }

    #[test]
    fn elderly_long_course_shifts_gradual_to_persistent() {
        let (fast, persistent, gradual) = group_shares(&Config::default(), 70, 30, 40_000, 21);
        // 9 / (7 + 2 + 4) / (84 - 6)
        assert!((fast - 0.09).abs() < 0.01, "fast {fast}");
        assert!((persistent - 0.13).abs() < 0.01, "persistent {persistent}");
        assert!((gradual - 0.78).abs() < 0.015, "gradual {gradual}");
    }

    #[test]
    fn young_short_course_keeps_base_weights() {
        let (fast, persistent, _) = group_shares(&Config::default(), 40, 10, 40_000, 22);
        assert!((fast - 0.09).abs() < 0.01, "fast {fast}");
        assert!((persistent - 0.07).abs() < 0.01, "persistent {persistent}");
    }

    #[test]
    fn small_gradual_weight_blocks_the_shifts() {
        // Gradual weight 1.5: neither shift fits.
        let config = Config { lc_base_fast_prob: 60.0, lc_base_persistent_prob: 38.5, ..Config::default() };
        let (_, persistent, gradual) = group_shares(&config, 70, 30, 40_000, 23);
        assert!((persistent - 0.385).abs() < 0.012, "persistent {persistent}");
        assert!((gradual - 0.015).abs() < 0.005, "gradual {gradual}");

        // Gradual weight 3: the elderly shift fits, the long-course one no longer does.
        let config = Config { lc_base_fast_prob: 60.0, lc_base_persistent_prob: 37.0, ..Config::default() };
        let (_, persistent, gradual) = group_shares(&config, 70, 30, 40_000, 24);
        assert!((persistent - 0.39).abs() < 0.012, "persistent {persistent}");
        assert!((gradual - 0.01).abs() < 0.004, "gradual {gradual}");
    }

    // ── Escalation on reinfection ─────────────────────────────────────────

    /// Fraction of `n` LC-active agents in `from` that moved to another group
    /// after one worsening, checking every agent carries its group's Weibull
    /// parameters afterwards.
    fn escalation_share(from: RecoveryGroup, n: usize, seed: u64) -> (f64, Vec<RecoveryGroup>) {
        let mut pop = population(n);
        let mut rng = SimRng::new(seed);
        let mut moved = Vec::new();
        for a in pop.agent_ids() {
            pop.start_long_covid(a, from, weibull_params(from), 40.0);
            worsen_on_reinfection(&mut pop, a, &mut rng);

            let i = a.index();
            let Some(group) = pop.recovery_group(a) else {
                panic!("agent {a} lost Long COVID on reinfection");
            };
            assert_eq!((pop.long_covid_weibull_k[i], pop.long_covid_weibull_lambda[i]), weibull_params(group));
            assert_eq!(pop.long_covid_severity[i], 50.0);
            if group != from {
                moved.push(group);
            }
        }
        (moved.len() as f64 / n as f64, moved)
    }

    #[test]
    fn fast_cases_escalate_to_gradual() {
        let (share, moved) = escalation_share(RecoveryGroup::Fast, 20_000, 31);
        assert!((share - 0.30).abs() < 0.015, "share {share}");
        assert!(moved.iter().all(|&g| g == RecoveryGroup::Gradual));
    }

    #[test]
    fn gradual_cases_escalate_to_persistent() {
        let (share, moved) = escalation_share(RecoveryGroup::Gradual, 20_000, 32);
        assert!((share - 0.20).abs() < 0.015, "share {share}");
        assert!(moved.iter().all(|&g| g == RecoveryGroup::Persistent));
    }

    #[test]
    fn persistent_cases_never_escalate() {
        let (share, _) = escalation_share(RecoveryGroup::Persistent, 2_000, 33);
        assert_eq!(share, 0.0);
    }

    #[test]
    fn escalated_case_loads_new_weibull_params() {
        let mut pop = population(1);
        let a = AgentId(0);
        let mut rng = SimRng::new(0);
        // Reinfect until the fast case escalates once.
        pop.start_long_covid(a, RecoveryGroup::Fast, weibull_params(RecoveryGroup::Fast), 20.0);
        while pop.recovery_group(a) == Some(RecoveryGroup::Fast) {
            worsen_on_reinfection(&mut pop, a, &mut rng);
        }
        assert_eq!(pop.recovery_group(a), Some(RecoveryGroup::Gradual));
        assert_eq!(pop.long_covid_weibull_k[0], 1.2);
        assert_eq!(pop.long_covid_weibull_lambda[0], 450.0);

        while pop.recovery_group(a) == Some(RecoveryGroup::Gradual) {
            worsen_on_reinfection(&mut pop, a, &mut rng);
        }
        assert_eq!(pop.recovery_group(a), Some(RecoveryGroup::Persistent));
        assert_eq!(pop.long_covid_weibull_k[0], 0.5);
        assert_eq!(pop.long_covid_weibull_lambda[0], 1200.0);
    }

    #[test]
    fn pending_onset_activates_on_its_day() {
        let config = Config::default();
        let mut pop = population(2);
        let mut rng = SimRng::new(0);
        for i in 0..2 {
            pop.lc_pending[i] = true;
            pop.lc_onset_day[i] = 35;
        }
        pop.start_long_covid(AgentId(1), RecoveryGroup::Persistent, (0.5, 1200.0), 60.0);

        activate_pending(&mut pop, Day(34), &config, &mut rng);
        assert!(pop.lc_pending[0]);
        assert!(!pop.is_lc_active(AgentId(0)));

        activate_pending(&mut pop, Day(35), &config, &mut rng);
        assert!(!pop.lc_pending[0]);
        assert!(pop.is_lc_active(AgentId(0)));
        assert!(!pop.lc_pending[1]);
        assert_eq!(pop.recovery_group(AgentId(1)), Some(RecoveryGroup::Persistent));
        assert_eq!(pop.long_covid_severity[1], 60.0);
    }

    #[test]
    fn recovery_pct_adjustments() {
        let fast = daily_recovery_pct(Some(RecoveryGroup::Fast), 10, 1.5, 60.0);
        let plain = daily_recovery_pct(None, 10, 1.5, 60.0);
        assert!(close(fast, 2.0 * plain));

        let before = daily_recovery_pct(Some(RecoveryGroup::Persistent), 1095, 0.5, 1200.0);
        let after = daily_recovery_pct(Some(RecoveryGroup::Persistent), 1096, 0.5, 1200.0);
        assert!(after < before * 0.2);

        assert_eq!(daily_recovery_pct(None, 1, 1.0, 1e9), 0.01);
        assert_eq!(daily_recovery_pct(Some(RecoveryGroup::Fast), 1, 1.0, 1.0), 15.0);
    }

    #[test]
    fn recovery_pct_matches_weibull_hazard() {
        // 100 * (1 - exp(-(k/λ)(t/λ)^(k-1))), then the group factor.
        let gradual = daily_recovery_pct(Some(RecoveryGroup::Gradual), 100, 1.2, 450.0);
        assert!(close(gradual, 0.197_195_805_080_385_7), "{gradual}");

        let persistent = daily_recovery_pct(Some(RecoveryGroup::Persistent), 10, 0.5, 1200.0);
        assert!(close(persistent, 0.136_618_614_287_860_04), "{persistent}");

        let fast = daily_recovery_pct(Some(RecoveryGroup::Fast), 30, 1.5, 60.0);
        assert!(close(fast, 3.504_467_237_390_352), "{fast}");

        let late = daily_recovery_pct(Some(RecoveryGroup::Persistent), 1096, 0.5, 1200.0);
        assert!(close(late, 0.001_307_677_613_224_034_2), "{late}");
    }

    #[test]
    fn recovery_clears_every_lc_field() {
        let mut pop = population(1);
        let a = AgentId(0);
        // Hazard of 1/day caps the daily chance at 15%.
        pop.start_long_covid(a, RecoveryGroup::Fast, (1.0, 1.0), 40.0);
        let mut rng = SimRng::new(6);
        let mut recovered = 0;
        for _ in 0..500 {
            recovered += recovery_pass(&mut pop, &mut rng);
        }
        assert_eq!(recovered, 1);
        assert!(!pop.is_lc_active(a));
        assert_eq!(pop.long_covid_severity[0], 0.0);
        assert_eq!(pop.long_covid_duration[0], 0);
        assert_eq!(pop.long_covid_recovery_group[0], RecoveryGroup::NONE_CODE);
    }

    #[test]
    fn missing_weibull_params_skip_the_roll() {
        let mut pop = population(1);
        pop.start_long_covid(AgentId(0), RecoveryGroup::Gradual, (0.0, 0.0), 50.0);
        let mut rng = SimRng::new(0);
        for _ in 0..100 {
            recovery_pass(&mut pop, &mut rng);
        }
        assert!(pop.is_lc_active(AgentId(0)));
        assert_eq!(pop.long_covid_duration[0], 100);
        assert_eq!(pop.long_covid_severity[0], 50.0);
    }

    #[test]
    fn gradual_cases_improve_slowly() {
        let mut pop = population(2);
        // Near-zero hazard keeps both agents at the 0.01% floor.
        pop.start_long_covid(AgentId(0), RecoveryGroup::Gradual, (1.0, 1e9), 50.0);
        pop.start_long_covid(AgentId(1), RecoveryGroup::Gradual, (1.0, 1e9), 5.02);
        pop.long_covid_duration[0] = 30;
        pop.long_covid_duration[1] = 30;

        recovery_pass(&mut pop, &mut SimRng::new(1));
        assert!(pop.is_lc_active(AgentId(0)));
        assert!(close(pop.long_covid_severity[0], 49.95));
        assert_eq!(pop.long_covid_severity[1], 5.0);
    }
}

// ── Transmission ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod transmission {
    use abm_agent::Population;
    use abm_core::{AgentId, Config, Day, SimRng};
    use abm_network::{ContactNetwork, ContactNetworkBuilder};

    use super::helpers::{make_infected, population};
    use crate::transmission::{infection_pct, is_infectious, vaccine_efficacy};
    use crate::transmission_step;

    fn line(n: usize) -> ContactNetwork {
        let mut b = ContactNetworkBuilder::new(n);
        for i in 1..n as u32 {
            b.add_edge(AgentId(i - 1), AgentId(i));
        }
        b.build()
    }

    /// Spread chance high enough that every exposure infects.
    fn certain_spread() -> Config {
        Config { covid_spread_chance_pct: 100.0, ..Config::default() }
    }

    fn source_pop(n: usize) -> Population {
        let mut pop = population(n);
        make_infected(&mut pop, AgentId(0), 1, (0, 0));
        pop
    }

    #[test]
    fn infectious_window_is_half_open() {
        let mut pop = population(1);
        make_infected(&mut pop, AgentId(0), 0, (0, 0));
        let states: Vec<bool> = (0..6)
            .map(|t| {
                pop.virus_check_timer[0] = t;
                is_infectious(&pop, AgentId(0))
            })
            .collect();
        assert_eq!(states, vec![false, true, true, true, true, false]);
    }

    #[test]
    fn vaccine_efficacy_decays_linearly() {
        let config = Config::default();
        assert!((vaccine_efficacy(&config, 100) - 69.0).abs() < 1e-9);
        assert_eq!(vaccine_efficacy(&config, 1000), 0.0);
        let flat = Config { vaccination_decay: false, ..Config::default() };
        assert_eq!(vaccine_efficacy(&flat, 1000), 80.0);
    }

    #[test]
    fn infection_pct_uses_age_ratio() {
        let pop = population(1);
        let p = infection_pct(&pop, AgentId(0), &Config::default());
        assert!((p - 10.0 * 15.0 / 13.0).abs() < 1e-6);
        assert_eq!(infection_pct(&pop, AgentId(0), &certain_spread()), 100.0);
    }

    #[test]
    fn infectious_source_infects_neighbor() {
        let mut pop = source_pop(2);
        let reinf = transmission_step(&mut pop, &line(2), Day(3), &certain_spread(), &mut SimRng::new(0));
        assert_eq!(reinf, 0);
        assert!(pop.infected[1]);
        assert_eq!(pop.infection_start_tick[1], 3);
        assert_eq!(pop.number_of_infection[1], 1);
    }

    #[test]
    fn prior_infection_counts_as_reinfection() {
        let mut pop = source_pop(2);
        pop.number_of_infection[1] = 2;
        let reinf = transmission_step(&mut pop, &line(2), Day(3), &certain_spread(), &mut SimRng::new(0));
        assert_eq!(reinf, 1);
        assert_eq!(pop.number_of_infection[1], 3);
    }

    #[test]
    fn new_infections_do_not_spread_same_day() {
        let mut pop = source_pop(3);
        transmission_step(&mut pop, &line(3), Day(1), &certain_spread(), &mut SimRng::new(0));
        assert!(pop.infected[1]);
        assert!(!pop.infected[2]);
    }

    #[test]
    fn source_outside_window_is_silent() {
        let mut pop = source_pop(2);
        pop.virus_check_timer[0] = 0;
        transmission_step(&mut pop, &line(2), Day(0), &certain_spread(), &mut SimRng::new(0));
        assert!(!pop.infected[1]);
    }

    #[test]
    fn immune_and_super_immune_neighbors_are_skipped() {
        let mut pop = population(3);
        make_infected(&mut pop, AgentId(1), 1, (0, 0));
        pop.immuned[0] = true;
        pop.super_immune[2] = true;
        transmission_step(&mut pop, &line(3), Day(1), &certain_spread(), &mut SimRng::new(0));
        assert!(!pop.infected[0]);
        assert!(!pop.infected[2]);
    }

    #[test]
    fn full_efficacy_vaccine_blocks() {
        let config = Config { efficiency_pct: 100.0, vaccination_decay: false, ..certain_spread() };
        let mut pop = source_pop(2);
        pop.vaccinated[1] = true;
        pop.vaccinated_time[1] = 1;
        transmission_step(&mut pop, &line(2), Day(1), &config, &mut SimRng::new(0));
        assert!(!pop.infected[1]);
    }

    #[test]
    fn symptomatic_source_can_stay_home() {
        let config = Config { precaution_pct: 100.0, ..certain_spread() };
        let mut pop = population(2);
        make_infected(&mut pop, AgentId(0), 2, (1, 10));
        pop.symptomatic[0] = true;
        transmission_step(&mut pop, &line(2), Day(2), &config, &mut SimRng::new(0));
        assert!(!pop.infected[1]);

        // On the first symptomatic day the source still mixes.
        pop.virus_check_timer[0] = 1;
        transmission_step(&mut pop, &line(2), Day(2), &config, &mut SimRng::new(0));
        assert!(pop.infected[1]);
    }
}

// ── Vaccination and productivity ──────────────────────────────────────────────

#[cfg(test)]
mod vaccination {
    use abm_core::{AgentId, Config, SimRng};

    use super::helpers::population;
    use crate::vaccination::BOOSTER_INTERVAL_DAYS;
    use crate::{age_and_boost, rollout};

    #[test]
    fn rollout_reaches_target_once() {
        let config = Config::default();
        let mut pop = population(101);
        let mut rng = SimRng::new(2);
        assert_eq!(rollout(&mut pop, &config, &mut rng), 80);
        assert_eq!(pop.count_vaccinated(), 80);
        assert!(pop.agent_ids().filter(|a| pop.vaccinated[a.index()]).all(|a| pop.vaccinated_time[a.index()] == 1));
        assert_eq!(rollout(&mut pop, &config, &mut rng), 0);
    }

    #[test]
    fn rollout_tops_up_existing_coverage() {
        let config = Config { vaccination_pct: 50.0, ..Config::default() };
        let mut pop = population(10);
        for i in 0..3 {
            pop.vaccinated[i] = true;
            pop.vaccinated_time[i] = 40;
        }
        assert_eq!(rollout(&mut pop, &config, &mut SimRng::new(0)), 2);
        assert_eq!(pop.count_vaccinated(), 5);
        assert_eq!(pop.vaccinated_time[0], 40);
    }

    #[test]
    fn zero_coverage_rollout_is_noop() {
        let config = Config { vaccination_pct: 0.0, ..Config::default() };
        let mut pop = population(10);
        assert_eq!(rollout(&mut pop, &config, &mut SimRng::new(0)), 0);
    }

    #[test]
    fn booster_decision_at_interval() {
        let always = Config { boosted_pct: 100.0, ..Config::default() };
        let never = Config { boosted_pct: 0.0, ..Config::default() };
        let mut pop = population(3);
        for i in 0..2 {
            pop.vaccinated[i] = true;
            pop.vaccinated_time[i] = BOOSTER_INTERVAL_DAYS - 1;
        }
        pop.vaccinated[2] = true;
        pop.vaccinated_time[2] = 10;

        age_and_boost(&mut pop, &always, &mut SimRng::new(0));
        assert!(pop.vaccinated[0]);
        assert_eq!(pop.vaccinated_time[0], 1);
        assert_eq!(pop.vaccinated_time[2], 11);

        pop.vaccinated_time[1] = BOOSTER_INTERVAL_DAYS - 1;
        age_and_boost(&mut pop, &never, &mut SimRng::new(0));
        assert!(!pop.vaccinated[1]);
        assert_eq!(pop.vaccinated_time[1], 0);
        assert!(pop.vaccinated[AgentId(0).index()]);
    }
}

#[cfg(test)]
mod productivity {
    use abm_agent::RecoveryGroup;
    use abm_core::AgentId;

    use super::helpers::population;
    use crate::productivity;

    #[test]
    fn empty_population_is_fully_productive() {
        assert_eq!(productivity(&population(0)), 100.0);
        assert_eq!(productivity(&population(5)), 100.0);
    }

    #[test]
    fn symptoms_and_lc_severity_reduce_productivity() {
        let mut pop = population(4);
        pop.symptomatic[0] = true;
        pop.start_long_covid(AgentId(1), RecoveryGroup::Gradual, (1.2, 450.0), 50.0);
        pop.symptomatic[2] = true;
        pop.start_long_covid(AgentId(2), RecoveryGroup::Fast, (1.5, 60.0), 80.0);
        // loss = 1 + 0.5 + 1 = 2.5 of 4 agents.
        assert!((productivity(&pop) - 37.5).abs() < 1e-9);
    }
}
