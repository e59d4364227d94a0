use crate::core::job::{Job, JobId};
use crate::shell::builtins::{self, prelude::*};
use crate::shell::job_control::Listing;

pub struct Jobs;

#[derive(Debug, Deserialize)]
struct JobsArgs {
    arg_jobspec: Vec<u32>,
    flag_l: bool,
    flag_p: bool,
}

impl builtins::BuiltinCommand for Jobs {
    const NAME: &'static str = builtins::JOBS_NAME;

    const HELP: &'static str = "\
jobs: jobs [-lp] [<jobspec>...]

Display status of jobs.

Usage:
    jobs [options] [<jobspec>...]

Lists the background jobs. JOBSPEC restricts output to that job.
Without options, the status of all background jobs is displayed.

Options:
    -l      lists process IDs in addition to the normal information
    -p      lists process IDs only

Exit Status:
Returns success unless an invalid option is given or a JOBSPEC is not found.";

    fn run<T: AsRef<str>>(shell: &mut Shell, args: &[T], stdout: &mut dyn Write) -> Result<()> {
        let args: JobsArgs = parse_args(Self::HELP, Self::NAME, args.iter().map(T::as_ref))?;
        debug!("{:?}", args);

        if args.arg_jobspec.is_empty() {
            match shell.jobs() {
                Listing::Empty if !args.flag_l && !args.flag_p => writeln!(stdout, "{}", Listing::Empty)?,
                Listing::Empty => {}
                Listing::Jobs(jobs) => {
                    for job in jobs {
                        write_job(stdout, job, &args)?;
                    }
                }
            }
            return Ok(());
        }

        for &id in &args.arg_jobspec {
            let job = shell.job_manager().get(JobId(id))?;
            write_job(stdout, job, &args)?;
        }

        Ok(())
    }
}

fn write_job(stdout: &mut dyn Write, job: &Job, args: &JobsArgs) -> Result<()> {
    if args.flag_p {
        writeln!(stdout, "{}", job.pid())?;
    } else if args.flag_l {
        writeln!(
            stdout,
            "[{}]  {} {}    {}",
            job.id(),
            job.pid(),
            job.status(),
            job.command()
        )?;
    } else {
        writeln!(stdout, "{}", job)?;
    }

    Ok(())
}
