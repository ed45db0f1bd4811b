extern crate clap;
extern crate pbr;
extern crate rand;

use blossom_matching::graph::*;
use blossom_matching::random_graph::*;
use blossom_matching::util::*;
use blossom_matching::*;
use pbr::ProgressBar;
use rand::Rng;

pub fn create_clap_parser<'a>(color_choice: clap::ColorChoice) -> clap::Command<'a> {
    clap::Command::new("Blossom Matching")
        .version(env!("CARGO_PKG_VERSION"))
        .author(clap::crate_authors!(", "))
        .about("Maximum-weight general graph matching using the primal-dual blossom method")
        .color(color_choice)
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            clap::Command::new("test")
                .about("testing features")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    clap::Command::new("random")
                        .about("cross validate the solver against brute-force enumeration on random graphs")
                        .arg(
                            clap::Arg::new("rounds")
                                .long("rounds")
                                .short('r')
                                .takes_value(true)
                                .help("the number of random graphs to solve [default: 1000]"),
                        )
                        .arg(
                            clap::Arg::new("vertex_num")
                                .long("vertex-num")
                                .short('n')
                                .takes_value(true)
                                .help("the number of vertices of each random graph [default: 8]"),
                        )
                        .arg(
                            clap::Arg::new("edge_probability")
                                .long("edge-probability")
                                .short('p')
                                .takes_value(true)
                                .help("the probability of each vertex pair being connected [default: 0.5]"),
                        )
                        .arg(
                            clap::Arg::new("min_weight")
                                .long("min-weight")
                                .takes_value(true)
                                .allow_hyphen_values(true)
                                .help("the minimum edge weight [default: -5]"),
                        )
                        .arg(
                            clap::Arg::new("max_weight")
                                .long("max-weight")
                                .takes_value(true)
                                .allow_hyphen_values(true)
                                .help("the maximum edge weight [default: 10]"),
                        )
                        .arg(
                            clap::Arg::new("max_cardinality")
                                .long("max-cardinality")
                                .help("maximize the number of matched pairs first and the weight second"),
                        )
                        .arg(
                            clap::Arg::new("seed")
                                .long("seed")
                                .takes_value(true)
                                .help("seed of the random graph generator [default: random]"),
                        ),
                ),
        )
}

pub fn main() {
    let matches = create_clap_parser(clap::ColorChoice::Auto).get_matches();
    match matches.subcommand() {
        Some(("test", matches)) => match matches.subcommand() {
            Some(("random", matches)) => {
                let rounds: u64 = matches.value_of("rounds").map(|s| s.parse().unwrap()).unwrap_or(1000);
                let vertex_num: VertexNum = matches
                    .value_of("vertex_num")
                    .map(|s| s.parse().unwrap())
                    .unwrap_or(8);
                let edge_probability: f64 = matches
                    .value_of("edge_probability")
                    .map(|s| s.parse().unwrap())
                    .unwrap_or(0.5);
                let min_weight: Weight = matches
                    .value_of("min_weight")
                    .map(|s| s.parse().unwrap())
                    .unwrap_or(-5);
                let max_weight: Weight = matches
                    .value_of("max_weight")
                    .map(|s| s.parse().unwrap())
                    .unwrap_or(10);
                let max_cardinality = matches.is_present("max_cardinality");
                let seed: u64 = matches
                    .value_of("seed")
                    .map(|s| s.parse().unwrap())
                    .unwrap_or_else(|| rand::thread_rng().gen());
                println!("seed: {}", seed); // for reproducing a failed round
                let mut generator = RandomGraphGenerator::new(seed);
                let mut progress_bar = ProgressBar::on(std::io::stderr(), rounds);
                for round in 0..rounds {
                    progress_bar.set(round);
                    let graph = generator.generate(vertex_num, edge_probability, min_weight, max_weight);
                    let matching = maximum_weight_matching(&graph, max_cardinality);
                    assert!(
                        is_matching(&graph, &matching),
                        "invalid matching at round {} of seed {}",
                        round,
                        seed
                    );
                    let objective = (matching.len(), graph.matching_weight(&matching));
                    let best = brute_force_maximum_weight_matching(&graph, max_cardinality);
                    if max_cardinality {
                        assert_eq!(objective, best, "suboptimal matching at round {} of seed {}", round, seed);
                    } else {
                        assert_eq!(
                            objective.1, best.1,
                            "suboptimal matching at round {} of seed {}",
                            round, seed
                        );
                    }
                }
                progress_bar.finish();
                println!("all {} rounds passed", rounds);
            }
            _ => unreachable!(),
        },
        _ => unreachable!(),
    }
}
