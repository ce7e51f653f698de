mod allocate;
mod cli;
mod render;

use award_allocator::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
