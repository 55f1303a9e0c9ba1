use crate::error::BayesTraitsError;
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Model selected at the first BayesTraits menu
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum ReconstructionMethod {
  #[default]
  Multistate,
  DiscreteIndependent,
  DiscreteDependent,
  ContinuousRandomWalk,
  ContinuousDirectional,
  ContinuousRegression,
}

impl ReconstructionMethod {
  pub const ALL: [Self; 6] = [
    Self::Multistate,
    Self::DiscreteIndependent,
    Self::DiscreteDependent,
    Self::ContinuousRandomWalk,
    Self::ContinuousDirectional,
    Self::ContinuousRegression,
  ];

  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Multistate => "multistate",
      Self::DiscreteIndependent => "discrete_independent",
      Self::DiscreteDependent => "discrete_dependent",
      Self::ContinuousRandomWalk => "continuous_random_walk",
      Self::ContinuousDirectional => "continuous_directional",
      Self::ContinuousRegression => "continuous_regression",
    }
  }

  /// Digit to answer the menu with
  pub const fn menu_choice(self) -> u8 {
    match self {
      Self::Multistate => 1,
      Self::DiscreteIndependent => 2,
      Self::DiscreteDependent => 3,
      Self::ContinuousRandomWalk => 4,
      Self::ContinuousDirectional => 5,
      Self::ContinuousRegression => 6,
    }
  }

  /// Wording of the menu entry as BayesTraits prints it
  pub const fn menu_label(self) -> &'static str {
    match self {
      Self::Multistate => "MultiState.",
      Self::DiscreteIndependent => "Discrete: Independent model",
      Self::DiscreteDependent => "Discrete: Dependent model",
      Self::ContinuousRandomWalk => "Continuous: Random Walk (Model A)",
      Self::ContinuousDirectional => "Continuous: Directional (Model B)",
      Self::ContinuousRegression => "Continuous: Regression",
    }
  }
}

impl Display for ReconstructionMethod {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for ReconstructionMethod {
  type Err = BayesTraitsError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|method| method.as_str() == s)
      .ok_or_else(|| BayesTraitsError::UnsupportedMethod(s.to_owned(), Self::ALL.iter().join(", ")))
  }
}

/// Analysis selected at the second BayesTraits menu
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum AnalysisMethod {
  /// Maximum likelihood
  #[default]
  Ml,
  /// Markov chain Monte Carlo
  Mcmc,
}

impl AnalysisMethod {
  pub const ALL: [Self; 2] = [Self::Ml, Self::Mcmc];

  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Ml => "ml",
      Self::Mcmc => "mcmc",
    }
  }

  pub const fn menu_choice(self) -> u8 {
    match self {
      Self::Ml => 1,
      Self::Mcmc => 2,
    }
  }

  pub const fn menu_label(self) -> &'static str {
    match self {
      Self::Ml => "Maximum Likelihood.",
      Self::Mcmc => "MCMC",
    }
  }
}

impl Display for AnalysisMethod {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for AnalysisMethod {
  type Err = BayesTraitsError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|method| method.as_str() == s)
      .ok_or_else(|| BayesTraitsError::UnsupportedAnalysisMethod(s.to_owned(), Self::ALL.iter().join(", ")))
  }
}
