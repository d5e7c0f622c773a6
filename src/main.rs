use library_tank::error::AppResult;

fn main() -> AppResult<()> {
    library_tank::entry::run()
}
