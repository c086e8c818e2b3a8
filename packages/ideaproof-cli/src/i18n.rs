use clap::ValueEnum;
use ideaproof_client::{
    Error, InputError, MintError, QueryError, SubmissionError, ValidationError,
};
use serde::{Deserialize, Serialize};

/// Language of everything printed to the user. Passed explicitly to the
/// renderer; the client crates never see it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    Fingerprint,
    Locator,
    Signature,
    Owner,
    RecordedAt,
    SubmittedAt,
    FileType,
    Title,
    Description,
    Recorded,
    Found,
    NotFound,
    Minted,
    MintAddress,
    TokenAccount,
    MetadataUri,
    MintFailed,
    NoRecords,
    Submitting,
    Verifying,
    Listing,
    LanguageSaved,
}

impl Language {
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            Language::En => &["Technology", "Art", "Business", "Science", "Literature", "Other"],
            Language::Zh => &["技术创新", "艺术设计", "商业模式", "科学研究", "文学创作", "其他"],
        }
    }

    pub fn licenses(self) -> &'static [&'static str] {
        match self {
            Language::En => &["MIT", "Creative Commons", "All Rights Reserved", "Public Domain"],
            Language::Zh => &["MIT", "知识共享", "版权所有", "公共领域"],
        }
    }

    pub fn label(self, label: Label) -> &'static str {
        use Label::*;

        match (self, label) {
            (Language::En, Fingerprint) => "Fingerprint",
            (Language::Zh, Fingerprint) => "哈希值",
            (Language::En, Locator) => "Record address",
            (Language::Zh, Locator) => "记录地址",
            (Language::En, Signature) => "Transaction",
            (Language::Zh, Signature) => "交易签名",
            (Language::En, Owner) => "Owner",
            (Language::Zh, Owner) => "所有者",
            (Language::En, RecordedAt) => "Recorded at",
            (Language::Zh, RecordedAt) => "记录时间",
            (Language::En, SubmittedAt) => "Submitted at",
            (Language::Zh, SubmittedAt) => "提交时间",
            (Language::En, FileType) => "Type",
            (Language::Zh, FileType) => "文件类型",
            (Language::En, Title) => "Title",
            (Language::Zh, Title) => "标题",
            (Language::En, Description) => "Description",
            (Language::Zh, Description) => "描述",
            (Language::En, Recorded) => "Idea recorded on the ledger",
            (Language::Zh, Recorded) => "创意已记录到区块链",
            (Language::En, Found) => "This content has been recorded",
            (Language::Zh, Found) => "该内容已被记录",
            (Language::En, NotFound) => "No record of this content was found",
            (Language::Zh, NotFound) => "未找到该内容的记录",
            (Language::En, Minted) => "NFT minted",
            (Language::Zh, Minted) => "NFT 铸造成功",
            (Language::En, MintAddress) => "Mint address",
            (Language::Zh, MintAddress) => "铸造地址",
            (Language::En, TokenAccount) => "Token account",
            (Language::Zh, TokenAccount) => "代币账户",
            (Language::En, MetadataUri) => "Metadata",
            (Language::Zh, MetadataUri) => "元数据",
            (Language::En, MintFailed) => "Recorded, but NFT minting failed",
            (Language::Zh, MintFailed) => "已记录，但 NFT 铸造失败",
            (Language::En, NoRecords) => "No ideas recorded yet",
            (Language::Zh, NoRecords) => "暂无创意记录",
            (Language::En, Submitting) => "Recording idea...",
            (Language::Zh, Submitting) => "正在记录创意...",
            (Language::En, Verifying) => "Verifying...",
            (Language::Zh, Verifying) => "正在验证...",
            (Language::En, Listing) => "Fetching records...",
            (Language::Zh, Listing) => "正在获取记录...",
            (Language::En, LanguageSaved) => "Language set to English",
            (Language::Zh, LanguageSaved) => "语言已切换为中文",
        }
    }

    pub fn error(self, error: &Error) -> String {
        let en = self == Language::En;

        match error {
            Error::Input(InputError::MissingContent) => pick(
                en,
                "Please enter content or select a file".into(),
                "请输入内容或选择文件".into(),
            ),
            Error::Input(InputError::MissingFile(path)) => pick(
                en,
                format!("File {} does not exist", path.display()),
                format!("文件 {} 不存在", path.display()),
            ),
            Error::Input(InputError::MissingCategory) => pick(
                en,
                format!("Please select a category: {}", self.categories().join(", ")),
                format!("请选择创意类别：{}", self.categories().join("、")),
            ),
            Error::Input(InputError::MissingLicense) => pick(
                en,
                format!("Please select a license: {}", self.licenses().join(", ")),
                format!("请选择版权声明：{}", self.licenses().join("、")),
            ),
            Error::IdentityRequired => pick(
                en,
                "Please connect your wallet first".into(),
                "请先连接钱包".into(),
            ),
            Error::Validation(ValidationError::HashTooLong { len }) => pick(
                en,
                format!("The hash has {len} characters, at most 64 are allowed"),
                format!("哈希值长度为 {len}，不能超过 64 个字符"),
            ),
            Error::Validation(ValidationError::MalformedHash) => pick(
                en,
                "The hash must be 64 hexadecimal characters".into(),
                "哈希值应为 64 个十六进制字符".into(),
            ),
            Error::Validation(ValidationError::TitleTooLong { max, .. }) => pick(
                en,
                format!("The title may be at most {max} bytes"),
                format!("标题不能超过 {max} 字节"),
            ),
            Error::Validation(ValidationError::DescriptionTooLong { max, .. }) => pick(
                en,
                format!("The description may be at most {max} bytes"),
                format!("描述不能超过 {max} 字节"),
            ),
            Error::Validation(ValidationError::Rejected(rejection)) => pick(
                en,
                format!("The program rejected the idea: {rejection}"),
                format!("合约拒绝了该创意：{rejection}"),
            ),
            Error::Io(error) => pick(
                en,
                format!("Failed to read the file: {error}"),
                format!("读取文件失败：{error}"),
            ),
            Error::Transport(error) => pick(
                en,
                format!("Could not reach the network, the result is inconclusive: {error}"),
                format!("无法连接网络，结果无法确定：{error}"),
            ),
            Error::Submission(SubmissionError::AlreadyRecorded { .. }) => pick(
                en,
                "You have already recorded this idea".into(),
                "该创意已由您记录过".into(),
            ),
            Error::Submission(SubmissionError::Program(rejection)) => pick(
                en,
                format!("The program rejected the submission: {rejection}"),
                format!("合约拒绝了提交：{rejection}"),
            ),
            Error::Submission(SubmissionError::Rejected(error)) => pick(
                en,
                format!("The transaction was rejected: {error}"),
                format!("交易被拒绝：{error}"),
            ),
            Error::Query(QueryError::ForeignOwner { address, .. }) => pick(
                en,
                format!("Account {address} does not belong to IdeaProof"),
                format!("账户 {address} 不属于 IdeaProof"),
            ),
            Error::Query(QueryError::Malformed { address, .. }) => pick(
                en,
                format!("Account {address} is not a valid idea record"),
                format!("账户 {address} 不是有效的创意记录"),
            ),
        }
    }

    pub fn mint_error(self, error: &MintError) -> String {
        let en = self == Language::En;

        match error {
            MintError::Unavailable => pick(
                en,
                "No metadata storage is configured, pass --metadata-endpoint or --metadata-dir"
                    .into(),
                "未配置元数据存储，请指定 --metadata-endpoint 或 --metadata-dir".into(),
            ),
            MintError::Upload(reason) => pick(
                en,
                format!("Uploading the metadata failed: {reason}"),
                format!("上传元数据失败：{reason}"),
            ),
            MintError::Mint(reason) => pick(
                en,
                format!("Minting the NFT failed: {reason}"),
                format!("铸造 NFT 失败：{reason}"),
            ),
        }
    }
}

fn pick(en: bool, english: String, chinese: String) -> String {
    if en {
        english
    } else {
        chinese
    }
}
