use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};
use log::{debug, trace};
use miette::Diagnostic;

/// The handful of version control operations a release needs.
pub trait VersionControl {
    /// Whether a reference (usually a tag) named `name` exists.
    ///
    /// A missing reference is `Ok(false)`. Any other failure is an error, because it means we
    /// don't actually know.
    fn reference_exists(&self, name: &str) -> Result<bool, Error>;

    /// The full message of the most recent commit, trimmed.
    fn last_commit_message(&self) -> Result<String, Error>;

    /// Stage `files` and commit them with `message`.
    fn commit(&self, files: &[PathBuf], message: &str) -> Result<(), Error>;
}

/// A Git repository on disk.
pub struct Git {
    repo: Repository,
}

impl Git {
    /// Open the repository containing `path`.
    pub fn discover(path: &Path) -> Result<Self, Error> {
        let repo = Repository::discover(path).map_err(ErrorKind::OpenRepo)?;
        Ok(Self { repo })
    }

    fn relative_to_workdir(&self, path: &Path) -> Result<PathBuf, Error> {
        let workdir = self.repo.workdir().ok_or(ErrorKind::BareRepo)?;
        let canonical = |path: &Path| {
            path.canonicalize().map_err(|source| ErrorKind::Path {
                path: path.to_path_buf(),
                source,
            })
        };
        let workdir = canonical(workdir)?;
        let full = canonical(path)?;
        full.strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| {
                ErrorKind::OutsideRepo {
                    path: path.to_path_buf(),
                }
                .into()
            })
    }
}

impl VersionControl for Git {
    fn reference_exists(&self, name: &str) -> Result<bool, Error> {
        match self.repo.resolve_reference_from_short_name(name) {
            Ok(reference) => {
                trace!("Found reference {:?} for {name}", reference.name());
                Ok(true)
            }
            Err(err) if err.code() == ErrorCode::NotFound => {
                debug!("No reference named {name}");
                Ok(false)
            }
            Err(err) if err.code() == ErrorCode::InvalidSpec => {
                debug!("{name} is not a valid reference name, so no such reference exists");
                Ok(false)
            }
            Err(source) => Err(ErrorKind::Lookup {
                name: name.to_string(),
                source,
            }
            .into()),
        }
    }

    fn last_commit_message(&self) -> Result<String, Error> {
        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(ErrorKind::HeadCommit)?;
        let message = String::from_utf8_lossy(head.message_raw_bytes());
        Ok(message.trim().to_string())
    }

    fn commit(&self, files: &[PathBuf], message: &str) -> Result<(), Error> {
        let paths = files
            .iter()
            .map(|path| self.relative_to_workdir(path))
            .collect::<Result<Vec<_>, _>>()?;

        let mut index = self.repo.index()?;
        for path in &paths {
            index.add_path(path)?;
        }
        index.write()?;
        let tree = self.repo.find_tree(index.write_tree()?)?;

        let signature = self.repo.signature().map_err(|_| ErrorKind::NoCommitter)?;
        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(err)
                if err.code() == ErrorCode::UnbornBranch || err.code() == ErrorCode::NotFound =>
            {
                None
            }
            Err(err) => return Err(err.into()),
        };
        let parents: Vec<_> = parent.iter().collect();
        let id = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        debug!("Created commit {id}");
        Ok(())
    }
}

#[derive(Debug, Diagnostic, thiserror::Error)]
#[error(transparent)]
#[diagnostic(transparent)]
pub struct Error(Box<ErrorKind>);

impl<T: Into<ErrorKind>> From<T> for Error {
    fn from(kind: T) -> Self {
        Self(Box::new(kind.into()))
    }
}

#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum ErrorKind {
    #[error("Could not open Git repository: {0}")]
    #[diagnostic(
        code(git::open_repo),
        help("Make sure you are in a Git repository and that you have permission to access it.")
    )]
    OpenRepo(#[source] git2::Error),
    #[error("Could not check whether {name} exists: {source}")]
    #[diagnostic(
        code(git::lookup),
        help(
            "The lookup failed for a reason other than the reference missing, so it's unknown \
                whether this version was already released. Set `on_lookup_error = \"proceed\"` \
                to release anyway."
        )
    )]
    Lookup {
        name: String,
        #[source]
        source: git2::Error,
    },
    #[error("Could not find head commit: {0}")]
    #[diagnostic(
        code(git::head_commit),
        help("There must be at least one commit to describe in the changelog.")
    )]
    HeadCommit(#[source] git2::Error),
    #[error("Could not determine Git committer to commit changes")]
    #[diagnostic(
        code(git::no_committer),
        help(
            "We couldn't determine who to commit the changes as. Please set the `user.name` and \
                `user.email` Git config options."
        )
    )]
    NoCommitter,
    #[error("Cannot commit in a bare repository")]
    #[diagnostic(code(git::bare_repo))]
    BareRepo,
    #[error("Could not resolve {path}: {source}")]
    #[diagnostic(code(git::path))]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not inside the Git repository")]
    #[diagnostic(
        code(git::outside_repo),
        help("The changelog must live inside the repository it is committed to.")
    )]
    OutsideRepo { path: PathBuf },
    #[error("Unknown Git error: {0}")]
    #[diagnostic(
        code(git::libgit2),
        help(
            "Something went wrong when interacting with Git that we don't have an explanation for. \
                    Maybe try performing the operation manually?"
        )
    )]
    Git(#[from] git2::Error),
}
