mod quiz_vm;
mod results_vm;

pub use quiz_vm::{
    OptionVm, QuizIntent, QuizScreenVm, QuizStep, QuizVm, map_quiz_screen, option_index_for_key,
};
pub use results_vm::{ResultsVm, ReviewOutcome, ReviewRowVm, map_results};
